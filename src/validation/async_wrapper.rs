//! Async wrapper around the synchronous EmailValidator.
//!
//! The DNS stage performs blocking lookups, so async callers go through
//! [`AsyncEmailValidator`], which runs validation on tokio's blocking pool.

use super::validator::EmailValidator;
use crate::error::{EmailResult, ValidationTaskError};
use async_trait::async_trait;
use std::sync::Arc;

/// Async validation interface used by the MCP server.
///
/// The outer `Result` reports whether validation ran at all; the inner
/// [`EmailResult`] is the verdict on the address.
#[async_trait]
pub trait AsyncEmailValidator: Send + Sync {
    async fn validate(
        &self,
        address: &str,
        check_dns: bool,
    ) -> Result<EmailResult<()>, ValidationTaskError>;
}

/// Runs an [`EmailValidator`] via `tokio::task::spawn_blocking`.
#[derive(Clone, Debug)]
pub struct AsyncEmailValidatorImpl {
    validator: Arc<EmailValidator>,
}

impl AsyncEmailValidatorImpl {
    pub fn new(validator: EmailValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

#[async_trait]
impl AsyncEmailValidator for AsyncEmailValidatorImpl {
    async fn validate(
        &self,
        address: &str,
        check_dns: bool,
    ) -> Result<EmailResult<()>, ValidationTaskError> {
        let validator = self.validator.clone();
        let owned = address.to_string();

        tokio::task::spawn_blocking(move || validator.validate(&owned, check_dns))
            .await
            .map_err(|e| {
                tracing::error!(email = %address, "Validation task failed: {}", e);
                ValidationTaskError::new(e.to_string())
            })
    }
}
