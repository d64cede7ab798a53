//! Outreach MCP Server - Main entry point
//!
//! Exposes email validation and script/style tag escaping over the Model
//! Context Protocol on stdio.

use anyhow::Result;
use outreach_mcp_server::validation::{
    AsyncEmailValidator, AsyncEmailValidatorImpl, DnsResolver, Translator,
};
use outreach_mcp_server::{
    Config, DenylistListener, EmailValidator, MessageCatalog, MetricsTracker, OutreachMcpServer,
    TagEscaper, ValidationListeners,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let translator: Arc<dyn Translator> = Arc::new(MessageCatalog::english());

    // Policy listeners run in registration order
    let mut listeners = ValidationListeners::new();
    if !config.email_denylist.is_empty() {
        info!("Denylist enabled with {} entries", config.email_denylist.len());
        listeners.add_listener(DenylistListener::new(
            &config.email_denylist,
            translator.clone(),
        ));
    }

    let resolver = DnsResolver::new(Duration::from_secs(config.dns_timeout_secs));
    let validator = EmailValidator::new(translator, listeners).with_resolver(Arc::new(resolver));
    let validator =
        Arc::new(AsyncEmailValidatorImpl::new(validator)) as Arc<dyn AsyncEmailValidator>;

    let escaper = TagEscaper::with_tags(&config.escaped_tags)?;
    let metrics = MetricsTracker::new();

    let server = OutreachMcpServer::new(
        validator,
        escaper,
        metrics.clone(),
        config.dns_check_by_default,
    );

    info!(
        "Outreach MCP Server initialized (dns check by default: {}, escaped tags: {:?})",
        config.dns_check_by_default, config.escaped_tags
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    outreach_mcp_server::server::run_server(server).await?;

    info!("{}", metrics.summary());
    info!("Outreach MCP Server shutdown complete");
    Ok(())
}
