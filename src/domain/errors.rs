//! Domain validation errors.

use std::fmt;

/// Syntax problems found while parsing an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The address does not have the shape `local@domain.tld`.
    InvalidFormat(String),

    /// The address contains whitespace or a disallowed character.
    InvalidCharacters(String),
}

impl ValidationError {
    /// The offending address.
    pub fn address(&self) -> &str {
        match self {
            Self::InvalidFormat(address) | Self::InvalidCharacters(address) => address,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(email) => write!(f, "Invalid email address format: {}", email),
            Self::InvalidCharacters(email) => {
                write!(f, "Email address contains invalid characters: {}", email)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
