//! Search tool implementation
//!
//! Implements the `search_icons(query)` MCP tool

use crate::cli::SearchArgs;
use crate::error::{validate_query, AppError};
use crate::hugeicons::types::{IconRecord, IconSummary};
use crate::hugeicons::{IconCatalog, IconSource};
use crate::mcp::{McpResponse, ToolResult};
use crate::search::SearchEngine;
use crate::tools::util::{into_response, json_result, parse_args, with_timeout};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

/// Handle search_icons tool call
pub async fn handle_search<S: IconSource>(
    id: Option<Value>,
    args: Value,
    catalog: &IconCatalog<S>,
) -> McpResponse {
    let result = with_timeout("Search", async {
        let search_args: SearchArgs = parse_args(args)?;
        execute_search(search_args, catalog).await
    })
    .await;
    into_response(id, result)
}

/// Shared implementation for search (used by MCP and CLI)
pub async fn execute_search<S: IconSource>(
    search_args: SearchArgs,
    catalog: &IconCatalog<S>,
) -> Result<ToolResult, AppError> {
    let query = validate_query(&search_args.query)?;
    let icons = catalog.icons().await?;

    let results = search_all(&SearchEngine::new(), &icons, &query);
    info!("Search '{}' returned {} icons", query, results.len());

    json_result(&results)
}

/// Run each comma-separated part of `query` as its own search.
///
/// Results are concatenated in query order; an icon already returned by an
/// earlier part is not repeated.
pub fn search_all(engine: &SearchEngine, icons: &[IconRecord], query: &str) -> Vec<IconSummary> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for part in query.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let matches = engine.search(icons, part);
        debug!("Sub-search '{}' matched {} icons", part, matches.len());
        for icon in matches {
            if seen.insert(icon.name.clone()) {
                results.push(icon);
            }
        }
    }

    results
}
