//! Domain value objects and types.
//!
//! Email addresses travel through the validator as raw text; once the syntax
//! stage has passed they can be viewed as an [`EmailAddress`] with a local
//! part and a domain.

pub mod email;
pub mod errors;

pub use email::EmailAddress;
pub use errors::ValidationError;
