//! MCP tool modules.
//!
//! Tools are grouped by domain: general-purpose ingestion, language- and
//! documentation-filtered analysis, and contextual help.

pub mod analyze;
pub mod ingest;
mod context;

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use repogest_core::{IngestError, IngestOptions, IngestOutput, Ingester};
    use rmcp::model::CallToolResult;

    pub const SUMMARY: &str = "Repository: octocat/hello-world\nFiles analyzed: 2";
    pub const TREE: &str = "hello-world/\n    README.md\n    src/main.rs";
    pub const CONTENT: &str = "FILE: README.md\nhello";

    /// Recording engine double: captures every call, replies with canned
    /// output or a canned engine failure.
    pub struct FakeIngester {
        calls: Mutex<Vec<(String, IngestOptions)>>,
        failure: Option<String>,
    }

    impl FakeIngester {
        pub fn succeeding() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: None,
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                failure: Some(message.to_string()),
            }
        }

        pub fn recorded_calls(&self) -> Vec<(String, IngestOptions)> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl Ingester for FakeIngester {
        async fn ingest(
            &self,
            repository_reference: &str,
            options: IngestOptions,
        ) -> Result<IngestOutput, IngestError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((repository_reference.to_string(), options));
            self.failure.as_ref().map_or_else(
                || {
                    Ok(IngestOutput {
                        summary: SUMMARY.to_string(),
                        tree: TREE.to_string(),
                        content: CONTENT.to_string(),
                    })
                },
                |message| Err(IngestError::Engine(message.clone())),
            )
        }
    }

    /// Extracts the JSON reply document from a tool result's single text
    /// content block.
    pub fn reply_json(result: &CallToolResult) -> serde_json::Value {
        let value = serde_json::to_value(result).expect("tool result should serialize");
        let text = value["content"][0]["text"]
            .as_str()
            .expect("reply should be a single text block")
            .to_string();
        serde_json::from_str(&text).expect("reply should be JSON")
    }
}
