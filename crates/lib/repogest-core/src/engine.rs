//! Ingestion engine contract and subprocess adapter.
//!
//! The engine itself (cloning, tree walking, glob filtering, digest
//! formatting) lives outside this workspace. `ProcessIngester` drives it as a
//! child process speaking JSON over stdin/stdout: one request in, one
//! [`IngestOutput`] out, stderr reserved for the engine's error text.

use std::error::Error;
use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::options::{IngestOptions, IngestOutput};

/// Errors raised while invoking the ingestion engine.
#[derive(Debug)]
pub enum IngestError {
    /// The engine process could not be started or written to.
    Spawn(std::io::Error),
    /// The engine ran and reported a failure of its own.
    Engine(String),
    /// The engine produced output this layer could not decode.
    Protocol(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(err) => write!(f, "failed to run ingestion engine: {err}"),
            Self::Engine(message) | Self::Protocol(message) => write!(f, "{message}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            Self::Engine(_) | Self::Protocol(_) => None,
        }
    }
}

/// The ingestion collaborator consumed by the MCP tool layer.
///
/// One call per tool invocation; implementations hold no state across calls
/// and apply no retry or caching of their own.
#[async_trait]
pub trait Ingester: Send + Sync + 'static {
    /// Fetches and digests `repository_reference` under `options`.
    ///
    /// # Errors
    /// Returns an [`IngestError`] when the engine cannot be reached, fails,
    /// or replies with something other than an [`IngestOutput`].
    async fn ingest(
        &self,
        repository_reference: &str,
        options: IngestOptions,
    ) -> Result<IngestOutput, IngestError>;
}

#[derive(Serialize)]
struct EngineRequest<'a> {
    repository_reference: &'a str,
    options: &'a IngestOptions,
}

/// Production [`Ingester`] that spawns a configured engine command per call.
///
/// The request is written as a single JSON document on the child's stdin; the
/// child replies with an [`IngestOutput`] JSON document on stdout and exits
/// zero, or exits non-zero with a human-readable message on stderr.
#[derive(Debug, Clone)]
pub struct ProcessIngester {
    command: String,
    args: Vec<String>,
}

impl ProcessIngester {
    #[must_use]
    pub const fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl Ingester for ProcessIngester {
    async fn ingest(
        &self,
        repository_reference: &str,
        options: IngestOptions,
    ) -> Result<IngestOutput, IngestError> {
        let request = EngineRequest {
            repository_reference,
            options: &options,
        };
        let payload = serde_json::to_vec(&request)
            .map_err(|err| IngestError::Protocol(format!("failed to encode engine request: {err}")))?;

        debug!(command = %self.command, repository = repository_reference, "invoking ingestion engine");

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(IngestError::Spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| IngestError::Protocol("engine stdin was not captured".to_string()))?;

        // The engine may emit output before it has drained a large request;
        // write and collect concurrently so neither side blocks on a full
        // pipe.
        let write = async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await
        };
        let (write_result, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(IngestError::Spawn)?;

        // An engine that fails fast may never read its stdin; report its own
        // message ahead of the resulting pipe error.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("ingestion engine exited with {}", output.status)
            } else {
                stderr
            };
            warn!(repository = repository_reference, %message, "ingestion engine failed");
            return Err(IngestError::Engine(message));
        }
        write_result.map_err(IngestError::Spawn)?;

        serde_json::from_slice(&output.stdout)
            .map_err(|err| IngestError::Protocol(format!("malformed engine output: {err}")))
    }
}
