//! MCP server implementation for repogest.
//!
//! This crate wires the ingestion engine into rmcp tool handlers and exposes
//! the MCP-facing API surface for repository ingestion and analysis.

mod reply;
pub mod patterns;
mod tools;
pub mod server;

use std::sync::Arc;

use repogest_core::Ingester;
use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool_handler,
};
use rmcp::model::{ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"repogest provides MCP tools for fetching a remote source-code repository and turning it into LLM-ready text: a summary, a file tree, and concatenated file contents.

Workflow:
1. `ingest_github_repo` is the general-purpose tool. Pass a repository URL and,
   optionally, `include_patterns`, `exclude_patterns` (shell-style globs), and
   `max_file_size_bytes` to bound what is read.
2. `get_repo_structure` returns only the summary and file tree, for a cheap
   first look at an unfamiliar repository.
3. `analyze_code_files` filters the ingest to one language's source files
   (python, javascript, typescript, go, rust, java, csharp) and skips
   dependency and build-output directories.
4. `get_repo_docs` pulls only documentation files (markdown, text, LICENSE,
   README).

Notes:
- Every tool replies with a single JSON document; check its `status` field.
  Failures carry `error_kind`, `message`, and a `context` echoing the
  repository reference.
- Nothing is cached between calls; each call fetches the repository afresh.
- Use `help` for a command listing. `health` returns `ok`.";

/// MCP server wrapper around the ingestion engine and tool routers.
pub struct RepoGestMcp<E: Ingester> {
    tool_router: ToolRouter<Self>,
    engine: Arc<E>,
}

impl<E: Ingester> Clone for RepoGestMcp<E> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            engine: self.engine.clone(),
        }
    }
}

impl<E: Ingester> RepoGestMcp<E> {
    /// Creates a new server owning its engine.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self::with_engine(Arc::new(engine))
    }

    /// Creates a new server using a shared engine handle.
    #[must_use]
    pub fn with_engine(engine: Arc<E>) -> Self {
        let tool_router =
            Self::tool_router_ingest() + Self::tool_router_analyze() + Self::tool_router_context();
        Self {
            tool_router,
            engine,
        }
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }
}

#[tool_handler]
impl<E: Ingester> ServerHandler for RepoGestMcp<E> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
