//! Core types and engine contract for repogest.
//!
//! This crate owns the option and output types exchanged with the ingestion
//! engine, the `Ingester` trait the MCP layer is generic over, and the
//! subprocess-backed production engine adapter.

pub mod engine;
pub mod options;

pub use engine::{IngestError, Ingester, ProcessIngester};
pub use options::{IngestOptions, IngestOutput};
