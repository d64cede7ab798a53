//! The three-stage email validator.

use super::dns::{DnsResolver, DomainResolver};
use super::event::{EmailValidationEvent, ON_EMAIL_VALIDATION};
use super::listener::ValidationListeners;
use super::translator::{
    Translator, INVALID_CHARACTERS, INVALID_DOMAIN, INVALID_FORMAT, REJECTED_BY_LISTENER,
};
use crate::domain::{EmailAddress, ValidationError};
use crate::error::{EmailResult, InvalidEmailError, ValidationStage};
use std::fmt;
use std::sync::Arc;

/// Validates email addresses in three fixed stages:
///
/// 1. syntax (format and disallowed characters)
/// 2. listener veto, via an [`EmailValidationEvent`]
/// 3. optionally, a DNS check that the domain accepts mail
///
/// The first failing stage ends validation. Listeners only see addresses
/// that passed the syntax stage.
///
/// # Example
///
/// ```
/// use outreach_mcp_server::validation::{
///     EmailValidationEvent, EmailValidator, MessageCatalog, ValidationListeners,
/// };
/// use std::sync::Arc;
///
/// let listeners = ValidationListeners::new().with_listener(|event: &mut EmailValidationEvent| {
///     if event.address().starts_with("bad@") {
///         event.set_invalid("bad email");
///     }
/// });
/// let validator = EmailValidator::new(Arc::new(MessageCatalog::english()), listeners);
///
/// assert!(validator.validate("john@gmail.com", false).is_ok());
/// assert_eq!(
///     validator.validate("bad@gmail.com", false).unwrap_err().to_string(),
///     "bad email"
/// );
/// ```
#[derive(Clone)]
pub struct EmailValidator {
    translator: Arc<dyn Translator>,
    listeners: ValidationListeners,
    resolver: Arc<dyn DomainResolver>,
}

impl EmailValidator {
    /// Create a validator that checks domains with the system DNS resolver.
    pub fn new(translator: Arc<dyn Translator>, listeners: ValidationListeners) -> Self {
        Self {
            translator,
            listeners,
            resolver: Arc::new(DnsResolver::default()),
        }
    }

    /// Replace the resolver used by the DNS stage.
    pub fn with_resolver(mut self, resolver: Arc<dyn DomainResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Validate an address, running the DNS stage only when `check_dns` is set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmailError` carrying a translated reason from the first
    /// stage that rejects the address.
    pub fn validate(&self, address: &str, check_dns: bool) -> EmailResult<()> {
        tracing::debug!(address = %address, check_dns, "Validating email address");

        let email = EmailAddress::parse(address).map_err(|e| self.syntax_error(e))?;

        self.do_plugin_validation(address)?;

        if check_dns && !self.resolver.accepts_mail(email.domain()) {
            return Err(self.reject(address, INVALID_DOMAIN, ValidationStage::Dns));
        }

        Ok(())
    }

    /// Boolean form of [`validate`](Self::validate).
    pub fn is_valid(&self, address: &str, check_dns: bool) -> bool {
        self.validate(address, check_dns).is_ok()
    }

    /// Run only the listener stage: dispatch a validation event and fail if any
    /// listener marked the address invalid.
    ///
    /// Meant for addresses whose syntax is already known to be good.
    pub fn do_plugin_validation(&self, address: &str) -> EmailResult<()> {
        let event = self.listeners.dispatch(EmailValidationEvent::new(address));

        tracing::debug!(
            topic = ON_EMAIL_VALIDATION,
            address = %address,
            valid = event.is_valid(),
            "Validation event dispatched"
        );

        if event.is_valid() {
            return Ok(());
        }

        match event.invalid_reason() {
            Some(reason) => {
                tracing::info!(
                    address = %address,
                    stage = %ValidationStage::Listener,
                    reason = %reason,
                    "Email address rejected"
                );
                Err(InvalidEmailError::new(
                    address,
                    reason,
                    ValidationStage::Listener,
                ))
            }
            None => Err(self.reject(address, REJECTED_BY_LISTENER, ValidationStage::Listener)),
        }
    }

    /// Whether the address has the shape `local@domain.tld` within length limits.
    pub fn is_valid_format(&self, address: &str) -> bool {
        EmailAddress::is_valid_format(address)
    }

    /// Whether the address is free of whitespace and disallowed characters.
    pub fn has_valid_characters(&self, address: &str) -> bool {
        EmailAddress::has_valid_characters(address)
    }

    /// Whether the address's domain accepts mail according to the resolver.
    /// An address without a domain never does.
    pub fn has_valid_domain(&self, address: &str) -> bool {
        Self::domain_from_email(address)
            .filter(|domain| !domain.is_empty())
            .is_some_and(|domain| self.resolver.accepts_mail(domain))
    }

    /// Everything after the last `@`.
    pub fn domain_from_email(address: &str) -> Option<&str> {
        address.rsplit_once('@').map(|(_, domain)| domain)
    }

    fn syntax_error(&self, error: ValidationError) -> InvalidEmailError {
        let key = match &error {
            ValidationError::InvalidFormat(_) => INVALID_FORMAT,
            ValidationError::InvalidCharacters(_) => INVALID_CHARACTERS,
        };

        self.reject(error.address(), key, ValidationStage::Syntax)
    }

    fn reject(&self, address: &str, key: &str, stage: ValidationStage) -> InvalidEmailError {
        let shown = if address.is_empty() { "?" } else { address };
        let reason = self.translator.trans(key, &[("%email%", shown)]);

        tracing::info!(
            address = %address,
            stage = %stage,
            reason = %reason,
            "Email address rejected"
        );

        InvalidEmailError::new(address, reason, stage)
    }
}

impl fmt::Debug for EmailValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailValidator")
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::translator::MessageCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedResolver(bool);

    impl DomainResolver for FixedResolver {
        fn accepts_mail(&self, _domain: &str) -> bool {
            self.0
        }
    }

    fn validator(listeners: ValidationListeners, dns_ok: bool) -> EmailValidator {
        EmailValidator::new(Arc::new(MessageCatalog::english()), listeners)
            .with_resolver(Arc::new(FixedResolver(dns_ok)))
    }

    #[test]
    fn test_valid_address_passes_all_stages() {
        let validator = validator(ValidationListeners::new(), true);
        assert!(validator.validate("john@gmail.com", true).is_ok());
        assert!(validator.is_valid("john@gmail.com", false));
    }

    #[test]
    fn test_syntax_errors_are_translated() {
        let validator = validator(ValidationListeners::new(), true);

        let err = validator.validate("john@doe", false).unwrap_err();
        assert_eq!(err.stage(), ValidationStage::Syntax);
        assert_eq!(err.to_string(), "john@doe is not a valid email address.");

        let err = validator.validate("jo*hn@gmail.com", false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "jo*hn@gmail.com contains characters that are not allowed in an email address."
        );
    }

    #[test]
    fn test_empty_address_uses_placeholder() {
        let validator = validator(ValidationListeners::new(), true);
        let err = validator.validate("", false).unwrap_err();
        assert_eq!(err.to_string(), "? is not a valid email address.");
        assert_eq!(err.address(), "");
    }

    #[test]
    fn test_listener_without_reason_gets_default_message() {
        let listeners = ValidationListeners::new()
            .with_listener(|event: &mut EmailValidationEvent| event.set_invalid(""));
        let validator = validator(listeners, true);

        let err = validator.do_plugin_validation("john@gmail.com").unwrap_err();
        assert_eq!(err.stage(), ValidationStage::Listener);
        assert_eq!(err.to_string(), "john@gmail.com was rejected.");
    }

    #[test]
    fn test_dns_stage_only_runs_when_requested() {
        let validator = validator(ValidationListeners::new(), false);
        assert!(validator.validate("john@gmail.com", false).is_ok());

        let err = validator.validate("john@gmail.com", true).unwrap_err();
        assert_eq!(err.stage(), ValidationStage::Dns);
    }

    #[test]
    fn test_listener_veto_skips_dns() {
        let lookups = Arc::new(AtomicUsize::new(0));

        struct CountingResolver(Arc<AtomicUsize>);
        impl DomainResolver for CountingResolver {
            fn accepts_mail(&self, _domain: &str) -> bool {
                self.0.fetch_add(1, Ordering::SeqCst);
                true
            }
        }

        let listeners = ValidationListeners::new()
            .with_listener(|event: &mut EmailValidationEvent| event.set_invalid("bad email"));
        let validator = EmailValidator::new(Arc::new(MessageCatalog::english()), listeners)
            .with_resolver(Arc::new(CountingResolver(lookups.clone())));

        assert!(validator.validate("bad@gmail.com", true).is_err());
        assert_eq!(lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_domain_helpers() {
        let validator = validator(ValidationListeners::new(), true);
        assert_eq!(
            EmailValidator::domain_from_email("john@mail.email"),
            Some("mail.email")
        );
        assert_eq!(EmailValidator::domain_from_email("john"), None);
        assert!(validator.has_valid_domain("john@gmail.com"));
        assert!(!validator.has_valid_domain("john@"));
        assert!(validator.is_valid_format("john.doe@gmail.com"));
        assert!(!validator.has_valid_characters("jo%hn@gmail.com"));
    }
}
