//! MCP server exposing the validation and content tools.
//!
//! This module provides the MCP protocol server that lets AI assistants
//! validate email addresses and escape markup through the Model Context Protocol.

pub mod handlers;

pub use handlers::OutreachMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Outreach MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
///
/// # Arguments
/// * `server` - The configured OutreachMcpServer instance
///
/// # Returns
/// An error if the server fails to start or encounters a fatal error
pub async fn run_server(server: OutreachMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
