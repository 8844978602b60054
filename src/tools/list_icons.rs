//! List tool implementation
//!
//! Implements the `list_icons()` MCP tool

use crate::cli::ListIconsArgs;
use crate::error::AppError;
use crate::hugeicons::{IconCatalog, IconSource};
use crate::mcp::{McpResponse, ToolResult};
use crate::tools::util::{into_response, json_result, parse_args, with_timeout};
use serde_json::Value;
use tracing::info;

/// Handle list_icons tool call
pub async fn handle_list_icons<S: IconSource>(
    id: Option<Value>,
    args: Value,
    catalog: &IconCatalog<S>,
) -> McpResponse {
    let result = with_timeout("List icons", async {
        let list_args: ListIconsArgs = parse_args(args)?;
        execute_list_icons(list_args, catalog).await
    })
    .await;
    into_response(id, result)
}

/// The whole catalog as pretty JSON (shared by MCP and CLI)
pub async fn execute_list_icons<S: IconSource>(
    _args: ListIconsArgs,
    catalog: &IconCatalog<S>,
) -> Result<ToolResult, AppError> {
    let icons = catalog.icons().await?;
    info!("Listing {} icons", icons.len());
    json_result(icons.as_slice())
}
