//! Validation listeners and the ordered list that dispatches to them.

use super::event::{EmailValidationEvent, ON_EMAIL_VALIDATION};
use std::fmt;
use std::sync::Arc;

/// A policy hook that can veto an otherwise well-formed address.
///
/// Closures of the form `Fn(&mut EmailValidationEvent)` implement this trait,
/// so small policies need no dedicated type.
pub trait EmailValidationListener: Send + Sync {
    fn on_email_validation(&self, event: &mut EmailValidationEvent);

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> EmailValidationListener for F
where
    F: Fn(&mut EmailValidationEvent) + Send + Sync,
{
    fn on_email_validation(&self, event: &mut EmailValidationEvent) {
        self(event)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Listeners invoked synchronously, in registration order, for every
/// validation event.
#[derive(Clone, Default)]
pub struct ValidationListeners {
    listeners: Vec<Arc<dyn EmailValidationListener>>,
}

impl ValidationListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener; it runs after every listener added before it.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: EmailValidationListener + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Builder-style variant of [`add_listener`](Self::add_listener).
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: EmailValidationListener + 'static,
    {
        self.add_listener(listener);
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every listener over the event and hand it back for inspection.
    ///
    /// Stops early once a listener calls
    /// [`stop_propagation`](EmailValidationEvent::stop_propagation).
    pub fn dispatch(&self, mut event: EmailValidationEvent) -> EmailValidationEvent {
        for listener in &self.listeners {
            if event.is_propagation_stopped() {
                break;
            }

            listener.on_email_validation(&mut event);

            tracing::trace!(
                topic = ON_EMAIL_VALIDATION,
                listener = listener.name(),
                valid = event.is_valid(),
                "Validation listener ran"
            );
        }

        event
    }
}

impl fmt::Debug for ValidationListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.listeners.iter().map(|l| l.name()))
            .finish()
    }
}
