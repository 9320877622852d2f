use repogest_core::Ingester;
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::RepoGestMcp;

/// Payload listing the MCP commands this server exposes.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List MCP commands to get context with how this MCP server works."
                    .to_string(),
                "ingest_github_repo - Ingest a repository and return summary, tree, and content."
                    .to_string(),
                "get_repo_structure - Return only a repository's summary and file tree."
                    .to_string(),
                "analyze_code_files - Ingest only one language's source files from a repository."
                    .to_string(),
                "get_repo_docs - Ingest only documentation files from a repository."
                    .to_string(),
                "health - Health check, returns 'ok'."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl<E: Ingester> RepoGestMcp<E> {
    #[tool(description = "List the MCP commands to get context with how this MCP server works.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(
            HelpCommands::default(),
        )?]))
    }

    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}
