//! Platform usage tool implementation
//!
//! Implements the `get_platform_usage(platform)` MCP tool

use crate::cli::UsageArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::tools::util::{into_response, json_result, parse_args};
use serde_json::Value;
use tracing::debug;

/// Handle get_platform_usage tool call
pub fn handle_platform_usage(id: Option<Value>, args: Value) -> McpResponse {
    let result = parse_args::<UsageArgs>(args).and_then(execute_platform_usage);
    into_response(id, result)
}

/// Usage document for one platform (shared by MCP and CLI)
pub fn execute_platform_usage(args: UsageArgs) -> Result<ToolResult, AppError> {
    debug!("Platform usage request for {}", args.platform);
    json_result(args.platform.usage())
}
