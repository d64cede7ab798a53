//! MCP tool handlers for the Outreach server.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.

use crate::content::TagEscaper;
use crate::error::EmailResult;
use crate::observability::{MetricsTracker, Timer};
use crate::validation::AsyncEmailValidator;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The Outreach MCP server exposing email validation and content escaping.
#[derive(Clone)]
pub struct OutreachMcpServer {
    validator: Arc<dyn AsyncEmailValidator>,
    escaper: Arc<TagEscaper>,
    metrics: MetricsTracker,
    dns_check_by_default: bool,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for OutreachMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "outreach-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for marketing automation content - validates email addresses (syntax, policy listeners, optional DNS) and escapes script/style tags for safe template display.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ValidateEmailParams {
    email: String,
    #[serde(default)]
    check_dns: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ShowScriptTagsParams {
    content: String,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// JSON body returned by the validate_email tool.
fn validation_report(email: &str, result: &EmailResult<()>) -> serde_json::Value {
    match result {
        Ok(()) => serde_json::json!({
            "email": email,
            "valid": true,
            "reason": null,
            "stage": null,
        }),
        Err(e) => serde_json::json!({
            "email": email,
            "valid": false,
            "reason": e.reason(),
            "stage": e.stage().as_str(),
        }),
    }
}

// Tool router implementation
#[tool_router]
impl OutreachMcpServer {
    /// Create a new Outreach MCP server.
    pub fn new(
        validator: Arc<dyn AsyncEmailValidator>,
        escaper: TagEscaper,
        metrics: MetricsTracker,
        dns_check_by_default: bool,
    ) -> Self {
        Self {
            validator,
            escaper: Arc::new(escaper),
            metrics,
            dns_check_by_default,
            tool_router: Self::tool_router(),
        }
    }

    /// Counters shared with this server.
    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    /// Validate one address and build the tool response.
    ///
    /// A validation task that fails without a verdict is a tool error, not a
    /// rejection, and is not counted in the metrics.
    async fn check_email(
        &self,
        email: &str,
        check_dns: Option<bool>,
    ) -> Result<serde_json::Value, McpError> {
        let check_dns = check_dns.unwrap_or(self.dns_check_by_default);
        let timer = Timer::new("validate_email");

        let result = self
            .validator
            .validate(email, check_dns)
            .await
            .map_err(to_mcp_error)?;

        let duration_ms = timer.finish();
        self.metrics
            .track_validation(duration_ms, result.as_ref().err().map(|e| e.stage()));

        Ok(validation_report(email, &result))
    }

    /// Validate an email address.
    #[tool(
        description = "Validate an email address. Checks syntax, runs registered policy listeners (e.g. denylists) and, when check_dns is true, verifies the domain has MX or A records. Returns whether the address is valid and, if not, the reason and the stage that rejected it."
    )]
    async fn validate_email(
        &self,
        params: Parameters<ValidateEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::info!("MCP Handler: validate_email called");
        tracing::debug!(
            "Parameters: email={}, check_dns={:?}",
            params.email,
            params.check_dns
        );

        let report = self.check_email(&params.email, params.check_dns).await?;
        let json_response = serde_json::to_string_pretty(&report).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }

    /// Escape script and style tags.
    #[tool(
        description = "Rewrite <script> and <style> elements into [script]...[/script] and [style]...[/style] placeholders so the content can be shown inside a template without executing. Attributes and inner content are kept; unterminated tags are left unchanged."
    )]
    async fn show_script_tags(
        &self,
        params: Parameters<ShowScriptTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::debug!("MCP Handler: show_script_tags called, content_len={}", params.content.len());

        let escaped = self.escaper.show_script_tags(&params.content);
        self.metrics.track_escape(params.content.len());

        let json_response =
            serde_json::to_string_pretty(&serde_json::json!({ "content": escaped }))
                .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(json_response)]))
    }
}
