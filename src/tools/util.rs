//! Utility functions for tools

use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tokio::time::{timeout, Duration};

/// Upper bound on a single tool call, network included
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(120);

/// Parse tool arguments; a missing or null argument object counts as `{}`
pub fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, AppError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))
}

/// Pretty-printed JSON as a single text content item
pub fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<ToolResult, AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode result: {}", e)))?;
    Ok(ToolResult::text(text))
}

/// Run a tool under `TOOL_TIMEOUT`
pub async fn with_timeout<F>(label: &str, fut: F) -> Result<ToolResult, AppError>
where
    F: Future<Output = Result<ToolResult, AppError>>,
{
    match timeout(TOOL_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!(
            "{} request exceeded {} second timeout",
            label,
            TOOL_TIMEOUT.as_secs()
        ))),
    }
}

/// Convert a tool outcome into the JSON-RPC response
pub fn into_response(id: Option<Value>, result: Result<ToolResult, AppError>) -> McpResponse {
    let encoded = result.and_then(|content| {
        serde_json::to_value(content)
            .map_err(|e| AppError::Internal(format!("Failed to encode result: {}", e)))
    });
    match encoded {
        Ok(value) => McpResponse::success(id, value),
        Err(e) => McpResponse::error(id, e.error_code(), &e.message()),
    }
}

/// First text item of a tool result, for printing in CLI mode
pub fn first_text(result: &ToolResult) -> String {
    result
        .content
        .first()
        .map(|c| c.text.clone())
        .unwrap_or_default()
}
