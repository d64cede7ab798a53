//! Outreach MCP Server - email validation and template-safe content helpers.
//!
//! This library provides the two content utilities of a marketing automation
//! platform and an MCP server that exposes them to AI assistants.
//!
//! # Architecture
//!
//! - **content**: Rewrites `<script>`/`<style>` elements into inert placeholders
//! - **validation**: Three-stage email validator with pluggable veto listeners
//! - **domain**: The `EmailAddress` value object and its syntax rules
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **observability**: Validation and escaping counters
//! - **server**: MCP protocol server

pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod observability;
pub mod server;
pub mod validation;

pub use config::Config;
pub use content::TagEscaper;
pub use domain::EmailAddress;
pub use error::{ConfigError, InvalidEmailError, ValidationStage, ValidationTaskError};
pub use observability::MetricsTracker;
pub use server::OutreachMcpServer;
pub use validation::{
    DenylistListener, EmailValidationEvent, EmailValidationListener, EmailValidator,
    MessageCatalog, Translator, ValidationListeners,
};
