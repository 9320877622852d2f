//! Reply-envelope formatting shared by every tool.
//!
//! Each tool call produces exactly one pretty-printed JSON document, carried
//! as a single text content block. Success and failure share the `status`
//! discriminant; engine failures never surface as protocol-level faults.

use std::borrow::Cow;

use repogest_core::IngestError;
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde_json::{Map, Value, json};

pub fn success(mut payload: Map<String, Value>) -> Result<CallToolResult, ErrorData> {
    payload.insert("status".to_string(), Value::String("success".to_string()));
    render(Value::Object(payload))
}

pub fn failure(
    error_kind: &str,
    err: &IngestError,
    context: Value,
) -> Result<CallToolResult, ErrorData> {
    render(json!({
        "status": "failure",
        "error_kind": error_kind,
        "message": err.to_string(),
        "context": context,
    }))
}

pub fn invalid_params(message: impl Into<Cow<'static, str>>) -> ErrorData {
    mcp_err(ErrorCode::INVALID_PARAMS, message)
}

fn render(reply: Value) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(&reply)
        .map_err(|err| mcp_err(ErrorCode::INTERNAL_ERROR, format!("failed to render reply: {err}")))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}
