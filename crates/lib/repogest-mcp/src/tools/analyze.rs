use repogest_core::{IngestOptions, Ingester};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::patterns::{
    CODE_EXCLUDE_PATTERNS,
    CODE_MAX_FILE_SIZE,
    DOCS_INCLUDE_PATTERNS,
    DOCS_MAX_FILE_SIZE,
    Language,
};
use crate::{RepoGestMcp, reply};

/// Parameters for the language-filtered analysis tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeCodeFilesParams {
    /// URL of the repository to analyze.
    pub repository_reference: String,
    /// Language whose source files to select. One of: python, javascript,
    /// typescript, go, rust, java, csharp.
    pub language: Language,
}

/// Parameters for the documentation tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetRepoDocsParams {
    /// URL of the repository to pull documentation from.
    pub repository_reference: String,
}

#[tool_router(router = tool_router_analyze, vis = "pub")]
impl<E: Ingester> RepoGestMcp<E> {
    #[tool(
        description = "Ingest only one language's source files from a remote repository, skipping dependency and build-output directories."
    )]
    async fn analyze_code_files(
        &self,
        Parameters(params): Parameters<AnalyzeCodeFilesParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let options = IngestOptions::new()
            .with_include_patterns(params.language.include_patterns().iter().copied())
            .with_exclude_patterns(CODE_EXCLUDE_PATTERNS)
            .with_max_file_size(CODE_MAX_FILE_SIZE);

        match self
            .engine()
            .ingest(&params.repository_reference, options)
            .await
        {
            Ok(output) => {
                let mut payload = Map::new();
                payload.insert("summary".to_string(), Value::String(output.summary));
                payload.insert("tree".to_string(), Value::String(output.tree));
                payload.insert("content".to_string(), Value::String(output.content));
                payload.insert(
                    "repository_reference".to_string(),
                    Value::String(params.repository_reference),
                );
                payload.insert(
                    "language".to_string(),
                    Value::String(params.language.as_str().to_string()),
                );
                reply::success(payload)
            }
            Err(err) => reply::failure(
                "code analysis failed",
                &err,
                json!({
                    "repository_reference": params.repository_reference,
                    "language": params.language.as_str(),
                }),
            ),
        }
    }

    #[tool(
        description = "Ingest only documentation files (markdown, text, LICENSE, README) from a remote repository."
    )]
    async fn get_repo_docs(
        &self,
        Parameters(params): Parameters<GetRepoDocsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let options = IngestOptions::new()
            .with_include_patterns(DOCS_INCLUDE_PATTERNS)
            .with_max_file_size(DOCS_MAX_FILE_SIZE);

        match self
            .engine()
            .ingest(&params.repository_reference, options)
            .await
        {
            Ok(output) => {
                let mut payload = Map::new();
                payload.insert("summary".to_string(), Value::String(output.summary));
                payload.insert("tree".to_string(), Value::String(output.tree));
                payload.insert("content".to_string(), Value::String(output.content));
                payload.insert(
                    "repository_reference".to_string(),
                    Value::String(params.repository_reference),
                );
                reply::success(payload)
            }
            Err(err) => reply::failure(
                "documentation retrieval failed",
                &err,
                json!({ "repository_reference": params.repository_reference }),
            ),
        }
    }
}
