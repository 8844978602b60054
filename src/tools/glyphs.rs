//! Glyph tools implementation
//!
//! Implements the `get_icon_glyphs(icon_name)` and
//! `get_icon_glyph_by_style(icon_name, style)` MCP tools

use crate::cli::{GlyphArgs, GlyphsArgs};
use crate::error::{validate_icon_name, AppError};
use crate::hugeicons::HugeiconsClient;
use crate::mcp::{McpResponse, ToolResult};
use crate::tools::util::{into_response, json_result, parse_args, with_timeout};
use serde_json::Value;
use tracing::info;

/// Handle get_icon_glyphs tool call
pub async fn handle_glyphs(id: Option<Value>, args: Value, client: &HugeiconsClient) -> McpResponse {
    let result = with_timeout("Glyphs", async {
        let glyphs_args: GlyphsArgs = parse_args(args)?;
        execute_glyphs(glyphs_args, client).await
    })
    .await;
    into_response(id, result)
}

/// Handle get_icon_glyph_by_style tool call
pub async fn handle_glyph_by_style(
    id: Option<Value>,
    args: Value,
    client: &HugeiconsClient,
) -> McpResponse {
    let result = with_timeout("Glyph", async {
        let glyph_args: GlyphArgs = parse_args(args)?;
        execute_glyph_by_style(glyph_args, client).await
    })
    .await;
    into_response(id, result)
}

/// All glyphs of an icon (shared by MCP and CLI)
pub async fn execute_glyphs(
    args: GlyphsArgs,
    client: &HugeiconsClient,
) -> Result<ToolResult, AppError> {
    let icon_name = validate_icon_name(&args.icon_name)?;
    let glyphs = client.get_glyphs(&icon_name).await?;
    info!("Icon {} has {} glyphs", icon_name, glyphs.len());
    json_result(&glyphs)
}

/// One style's glyph pair (shared by MCP and CLI)
pub async fn execute_glyph_by_style(
    args: GlyphArgs,
    client: &HugeiconsClient,
) -> Result<ToolResult, AppError> {
    let icon_name = validate_icon_name(&args.icon_name)?;
    let pair = client.get_glyph_by_style(&icon_name, args.style).await?;
    info!("Fetched {} glyph for {}", args.style, icon_name);
    json_result(&pair)
}
