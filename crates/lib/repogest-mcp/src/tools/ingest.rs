use chrono::Utc;
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

use crate::patterns::STRUCTURE_MAX_FILE_SIZE;
use crate::{RepoGestMcp, reply};

/// Parameters for the general-purpose ingest tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IngestGithubRepoParams {
    /// URL of the repository to ingest.
    pub repository_reference: String,
    /// Shell-style globs selecting files to include, in precedence order.
    /// Must be non-empty when present.
    pub include_patterns: Option<Vec<String>>,
    /// Shell-style globs selecting files to exclude, in precedence order.
    /// Must be non-empty when present.
    pub exclude_patterns: Option<Vec<String>>,
    /// Per-file size cap in bytes; larger files are skipped by the engine.
    pub max_file_size_bytes: Option<u64>,
}

/// Parameters for the structure-only tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetRepoStructureParams {
    /// URL of the repository to inspect.
    pub repository_reference: String,
}

#[tool_router(router = tool_router_ingest, vis = "pub")]
impl<E: Ingester> RepoGestMcp<E> {
    #[tool(
        description = "Ingest a remote repository and return its summary, file tree, and concatenated file contents. Optional glob filters and a per-file size cap bound what is read."
    )]
    async fn ingest_github_repo(
        &self,
        Parameters(params): Parameters<IngestGithubRepoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        if params.include_patterns.as_ref().is_some_and(Vec::is_empty) {
            return Err(reply::invalid_params(
                "include_patterns must not be empty when present",
            ));
        }
        if params.exclude_patterns.as_ref().is_some_and(Vec::is_empty) {
            return Err(reply::invalid_params(
                "exclude_patterns must not be empty when present",
            ));
        }

        let mut options = IngestOptions::new();
        if let Some(patterns) = params.include_patterns.clone() {
            options = options.with_include_patterns(patterns);
        }
        if let Some(patterns) = params.exclude_patterns.clone() {
            options = options.with_exclude_patterns(patterns);
        }
        if let Some(max_file_size) = params.max_file_size_bytes {
            options = options.with_max_file_size(max_file_size);
        }

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
                if let Some(patterns) = params.include_patterns {
                    payload.insert("include_patterns".to_string(), json!(patterns));
                }
                if let Some(patterns) = params.exclude_patterns {
                    payload.insert("exclude_patterns".to_string(), json!(patterns));
                }
                if let Some(max_file_size) = params.max_file_size_bytes {
                    payload.insert("max_file_size_bytes".to_string(), json!(max_file_size));
                }
                payload.insert(
                    "ingested_at".to_string(),
                    Value::String(Utc::now().to_rfc3339()),
                );
                reply::success(payload)
            }
            Err(err) => reply::failure(
                "ingestion failed",
                &err,
                json!({ "repository_reference": params.repository_reference }),
            ),
        }
    }

    #[tool(
        description = "Return only the summary and file tree of a remote repository, skipping file contents. Cheap first look at an unfamiliar repository."
    )]
    async fn get_repo_structure(
        &self,
        Parameters(params): Parameters<GetRepoStructureParams>,
    ) -> Result<CallToolResult, ErrorData> {
        // The engine still produces a content block; the sentinel size keeps
        // it near-empty and the reply drops it entirely.
        let options = IngestOptions::new().with_max_file_size(STRUCTURE_MAX_FILE_SIZE);

        match self
            .engine()
            .ingest(&params.repository_reference, options)
            .await
        {
            Ok(output) => {
                let mut payload = Map::new();
                payload.insert("summary".to_string(), Value::String(output.summary));
                payload.insert("tree".to_string(), Value::String(output.tree));
                payload.insert(
                    "repository_reference".to_string(),
                    Value::String(params.repository_reference),
                );
                reply::success(payload)
            }
            Err(err) => reply::failure(
                "structure retrieval failed",
                &err,
                json!({ "repository_reference": params.repository_reference }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tools::testing::{CONTENT, FakeIngester, SUMMARY, TREE, reply_json};

    const REPO: &str = "https://github.com/octocat/hello-world";

    fn server(engine: &Arc<FakeIngester>) -> RepoGestMcp<FakeIngester> {
        RepoGestMcp::with_engine(engine.clone())
    }

    #[tokio::test]
    async fn ingest_forwards_supplied_options_verbatim() {
        let engine = Arc::new(FakeIngester::succeeding());
        let result = server(&engine)
            .ingest_github_repo(Parameters(IngestGithubRepoParams {
                repository_reference: REPO.to_string(),
                include_patterns: Some(vec!["*.rs".to_string()]),
                exclude_patterns: Some(vec!["target/*".to_string()]),
                max_file_size_bytes: Some(4096),
            }))
            .await
            .expect("tool call should produce a reply");

        let calls = engine.recorded_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, REPO);
        assert_eq!(
            calls[0].1,
            IngestOptions::new()
                .with_include_patterns(["*.rs"])
                .with_exclude_patterns(["target/*"])
                .with_max_file_size(4096)
        );

        let reply = reply_json(&result);
        assert_eq!(reply["status"], "success");
        assert_eq!(reply["summary"], SUMMARY);
        assert_eq!(reply["tree"], TREE);
        assert_eq!(reply["content"], CONTENT);
        assert_eq!(reply["repository_reference"], REPO);
        assert_eq!(reply["include_patterns"][0], "*.rs");
        assert_eq!(reply["max_file_size_bytes"], 4096);
        assert!(
            !reply["ingested_at"]
                .as_str()
                .expect("ingested_at should be a string")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn ingest_omits_absent_options_entirely() {
        let engine = Arc::new(FakeIngester::succeeding());
        let result = server(&engine)
            .ingest_github_repo(Parameters(IngestGithubRepoParams {
                repository_reference: REPO.to_string(),
                include_patterns: None,
                exclude_patterns: None,
                max_file_size_bytes: None,
            }))
            .await
            .expect("tool call should produce a reply");

        assert_eq!(engine.recorded_calls()[0].1, IngestOptions::new());

        let reply = reply_json(&result);
        assert_eq!(reply["status"], "success");
        assert!(reply.get("include_patterns").is_none());
        assert!(reply.get("exclude_patterns").is_none());
        assert!(reply.get("max_file_size_bytes").is_none());
    }

    #[tokio::test]
    async fn ingest_rejects_empty_pattern_lists_before_the_engine_runs() {
        let engine = Arc::new(FakeIngester::succeeding());
        let server = server(&engine);

        let err = server
            .ingest_github_repo(Parameters(IngestGithubRepoParams {
                repository_reference: REPO.to_string(),
                include_patterns: Some(Vec::new()),
                exclude_patterns: None,
                max_file_size_bytes: None,
            }))
            .await
            .expect_err("empty include_patterns should be rejected");
        assert!(err.message.contains("include_patterns"));

        let err = server
            .ingest_github_repo(Parameters(IngestGithubRepoParams {
                repository_reference: REPO.to_string(),
                include_patterns: None,
                exclude_patterns: Some(Vec::new()),
                max_file_size_bytes: None,
            }))
            .await
            .expect_err("empty exclude_patterns should be rejected");
        assert!(err.message.contains("exclude_patterns"));

        assert!(engine.recorded_calls().is_empty(), "engine must not be invoked");
    }

    #[tokio::test]
    async fn ingest_failure_reply_carries_engine_message_and_context() {
        let engine = Arc::new(FakeIngester::failing("repository clone failed"));
        let result = server(&engine)
            .ingest_github_repo(Parameters(IngestGithubRepoParams {
                repository_reference: REPO.to_string(),
                include_patterns: None,
                exclude_patterns: None,
                max_file_size_bytes: None,
            }))
            .await
            .expect("engine failure should still produce a reply");

        let reply = reply_json(&result);
        assert_eq!(reply["status"], "failure");
        assert_eq!(reply["error_kind"], "ingestion failed");
        assert_eq!(reply["message"], "repository clone failed");
        assert_eq!(reply["context"]["repository_reference"], REPO);
    }

    #[tokio::test]
    async fn structure_forces_sentinel_size_and_drops_content() {
        let engine = Arc::new(FakeIngester::succeeding());
        let result = server(&engine)
            .get_repo_structure(Parameters(GetRepoStructureParams {
                repository_reference: REPO.to_string(),
            }))
            .await
            .expect("tool call should produce a reply");

        let calls = engine.recorded_calls();
        assert_eq!(
            calls[0].1,
            IngestOptions::new().with_max_file_size(STRUCTURE_MAX_FILE_SIZE)
        );

        let reply = reply_json(&result);
        assert_eq!(reply["status"], "success");
        assert_eq!(reply["summary"], SUMMARY);
        assert_eq!(reply["tree"], TREE);
        assert_eq!(reply["repository_reference"], REPO);
        assert!(reply.get("content").is_none(), "content must not be echoed");
    }

    #[tokio::test]
    async fn structure_failure_uses_its_own_error_kind() {
        let engine = Arc::new(FakeIngester::failing("ref not found"));
        let result = server(&engine)
            .get_repo_structure(Parameters(GetRepoStructureParams {
                repository_reference: REPO.to_string(),
            }))
            .await
            .expect("engine failure should still produce a reply");

        let reply = reply_json(&result);
        assert_eq!(reply["status"], "failure");
        assert_eq!(reply["error_kind"], "structure retrieval failed");
        assert_eq!(reply["message"], "ref not found");
        assert_eq!(reply["context"]["repository_reference"], REPO);
    }
}
