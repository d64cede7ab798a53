//! Error types for the Outreach MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use std::fmt;
use thiserror::Error;

/// The validation stage that rejected an email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStage {
    /// Address format or disallowed characters
    Syntax,
    /// A registered validation listener vetoed the address
    Listener,
    /// The domain cannot receive mail
    Dns,
}

impl ValidationStage {
    /// Stable lowercase name, used in logs and tool responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStage::Syntax => "syntax",
            ValidationStage::Listener => "listener",
            ValidationStage::Dns => "dns",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An email address failed validation.
///
/// Every stage reports through this one error; the display string is the
/// translated reason and nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvalidEmailError {
    address: String,
    reason: String,
    stage: ValidationStage,
}

impl InvalidEmailError {
    pub fn new(
        address: impl Into<String>,
        reason: impl Into<String>,
        stage: ValidationStage,
    ) -> Self {
        Self {
            address: address.into(),
            reason: reason.into(),
            stage,
        }
    }

    /// The rejected address, exactly as submitted.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn stage(&self) -> ValidationStage {
        self.stage
    }
}

/// The validation call itself failed before producing a verdict, for example
/// because a listener or the resolver panicked on the blocking pool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation task failed: {message}")]
pub struct ValidationTaskError {
    message: String,
}

impl ValidationTaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),
}

/// Convenience type alias for Results with InvalidEmailError
pub type EmailResult<T> = Result<T, InvalidEmailError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
