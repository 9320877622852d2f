//! Daemon entry point for the repogest MCP server.
//!
//! Loads configuration from CLI arguments and the environment, wires up the
//! subprocess ingestion engine, and serves the MCP protocol over stdio and/or
//! streamable HTTP.

mod config;

use std::sync::Arc;

use repogest_core::ProcessIngester;
use repogest_mcp::server::{self, McpHttpServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::RepoGestConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = RepoGestConfig::from_args()?;
    init_tracing(&config);

    let engine = Arc::new(ProcessIngester::new(
        config.engine_command.clone(),
        config.engine_args.clone(),
    ));
    info!(command = engine.command(), "ingestion engine configured");

    if config.http_serve {
        let http_config = McpHttpServerConfig::new(config.http_addr)
            .with_stateful_mode(config.http_stateful)
            .with_sse_keep_alive(config.sse_keep_alive)
            .with_sse_retry(config.sse_retry);
        if config.enable_stdio {
            let http_engine = engine.clone();
            tokio::spawn(async move {
                if let Err(err) = server::serve_streamable_http(http_engine, http_config).await {
                    error!(%err, "streamable HTTP server exited");
                }
            });
            server::serve_stdio(engine).await?;
        } else {
            server::serve_streamable_http(engine, http_config).await?;
        }
    } else {
        server::serve_stdio(engine).await?;
    }
    Ok(())
}

fn init_tracing(config: &RepoGestConfig) {
    // stdout belongs to the stdio transport; logs go to stderr.
    let filter =
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
