//! Email address validation.
//!
//! [`EmailValidator`] runs a syntax check, then lets registered
//! [`EmailValidationListener`]s veto the address, then optionally checks that
//! the domain accepts mail. Translation, listeners and DNS resolution are all
//! injected.

pub mod async_wrapper;
pub mod denylist;
pub mod dns;
pub mod event;
pub mod listener;
pub mod translator;
pub mod validator;

pub use async_wrapper::{AsyncEmailValidator, AsyncEmailValidatorImpl};
pub use denylist::DenylistListener;
pub use dns::{DnsResolver, DomainResolver};
pub use event::{EmailValidationEvent, ON_EMAIL_VALIDATION};
pub use listener::{EmailValidationListener, ValidationListeners};
pub use translator::{MessageCatalog, Translator};
pub use validator::EmailValidator;
