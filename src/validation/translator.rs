//! Message translation for validation failures.

use std::collections::HashMap;

/// Message key for a badly formatted address.
pub const INVALID_FORMAT: &str = "email.address.invalid.format";
/// Message key for an address containing disallowed characters.
pub const INVALID_CHARACTERS: &str = "email.address.invalid.characters";
/// Message key for a domain that cannot receive mail.
pub const INVALID_DOMAIN: &str = "email.address.invalid.domain";
/// Message key used when a listener rejects without giving a reason.
pub const REJECTED_BY_LISTENER: &str = "email.address.invalid.rejected";
/// Message key for an address or domain on the denylist.
pub const DENYLISTED: &str = "email.address.invalid.denylisted";

/// Turns a message key plus `%placeholder%` parameters into display text.
///
/// Any `Fn(&str, &[(&str, &str)]) -> String` closure is a translator.
pub trait Translator: Send + Sync {
    fn trans(&self, key: &str, params: &[(&str, &str)]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, &str)]) -> String + Send + Sync,
{
    fn trans(&self, key: &str, params: &[(&str, &str)]) -> String {
        self(key, params)
    }
}

/// An in-memory catalog of message templates.
///
/// Unknown keys translate to the key itself.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// The built-in English messages.
    pub fn english() -> Self {
        Self::new()
            .with_message(INVALID_FORMAT, "%email% is not a valid email address.")
            .with_message(
                INVALID_CHARACTERS,
                "%email% contains characters that are not allowed in an email address.",
            )
            .with_message(
                INVALID_DOMAIN,
                "The domain of %email% does not appear to accept email.",
            )
            .with_message(REJECTED_BY_LISTENER, "%email% was rejected.")
            .with_message(DENYLISTED, "%email% is on the denylist.")
    }

    /// Add or replace a message template.
    pub fn with_message(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Translator for MessageCatalog {
    fn trans(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = self.messages.get(key).map(String::as_str).unwrap_or(key);

        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(name, value)
            })
    }
}
