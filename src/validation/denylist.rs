//! A listener that rejects addresses and domains from a fixed denylist.

use super::event::EmailValidationEvent;
use super::listener::EmailValidationListener;
use super::translator::{Translator, DENYLISTED};
use std::collections::HashSet;
use std::sync::Arc;

/// Rejects an address when the address itself or its domain is listed.
///
/// Entries containing `@` match whole addresses; all other entries match the
/// domain. Comparison is case-insensitive.
pub struct DenylistListener {
    addresses: HashSet<String>,
    domains: HashSet<String>,
    translator: Arc<dyn Translator>,
}

impl DenylistListener {
    pub fn new<I, S>(entries: I, translator: Arc<dyn Translator>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (addresses, domains): (HashSet<String>, HashSet<String>) = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .partition(|entry| entry.contains('@'));

        Self {
            addresses,
            domains,
            translator,
        }
    }

    fn is_denied(&self, address: &str) -> bool {
        let address = address.to_lowercase();

        if self.addresses.contains(&address) {
            return true;
        }

        address
            .rsplit_once('@')
            .is_some_and(|(_, domain)| self.domains.contains(domain))
    }
}

impl EmailValidationListener for DenylistListener {
    fn on_email_validation(&self, event: &mut EmailValidationEvent) {
        if !self.is_denied(event.address()) {
            return;
        }

        let reason = self
            .translator
            .trans(DENYLISTED, &[("%email%", event.address())]);
        tracing::debug!(address = %event.address(), "Address is denylisted");
        event.set_invalid(reason);
    }

    fn name(&self) -> &str {
        "denylist"
    }
}
