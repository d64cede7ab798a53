//! The event handed to validation listeners.

/// Topic name under which email validation events are dispatched.
pub const ON_EMAIL_VALIDATION: &str = "email.on_email_validation";

/// A candidate address on its way through the listener chain.
///
/// Events start out valid. Any listener may mark the address invalid; the
/// validator reads the final state once every listener has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailValidationEvent {
    address: String,
    valid: bool,
    invalid_reason: Option<String>,
    propagation_stopped: bool,
}

impl EmailValidationEvent {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            valid: true,
            invalid_reason: None,
            propagation_stopped: false,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the address invalid. An empty reason keeps any reason set
    /// earlier; with none, the validator supplies its default message.
    pub fn set_invalid(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        self.valid = false;
        if !reason.is_empty() {
            self.invalid_reason = Some(reason);
        }
    }

    pub fn invalid_reason(&self) -> Option<&str> {
        self.invalid_reason.as_deref()
    }

    /// Skip every listener registered after the current one.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
