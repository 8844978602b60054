//! MCP (Model Context Protocol) handling module
//!
//! This module implements the JSON-RPC 2.0 protocol for MCP communication.

use crate::cache::CatalogCache;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::hugeicons::{HugeiconsClient, IconCatalog, IconSource, Platform};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info};

const PROTOCOL_VERSION: &str = "2024-11-05";
const PLATFORM_DOCS_PREFIX: &str = "hugeicons://docs/platforms/";
const ICONS_INDEX_URI: &str = "hugeicons://icons/index";

/// Server state shared by every request of one stdio session
pub struct ServerContext<S = HugeiconsClient> {
    pub client_info: Option<ClientInfo>,
    pub catalog: IconCatalog<S>,
    pub glyphs: HugeiconsClient,
}

impl ServerContext<HugeiconsClient> {
    /// Wire the HTTP client and catalog cache from configuration
    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let client = HugeiconsClient::new(config)?;
        let mut catalog = IconCatalog::new(client.clone());
        if let Some(dir) = config.disk_cache_dir() {
            debug!("Catalog snapshot directory: {}", dir.display());
            catalog = catalog.with_disk_cache(CatalogCache::new(dir), config.cache_ttl_hours);
        }
        Ok(Self::new(catalog, client))
    }
}

impl<S: IconSource> ServerContext<S> {
    pub fn new(catalog: IconCatalog<S>, glyphs: HugeiconsClient) -> Self {
        Self {
            client_info: None,
            catalog,
            glyphs,
        }
    }

    pub fn get_client_name(&self) -> String {
        self.client_info
            .as_ref()
            .and_then(|info| info.name.as_ref())
            .cloned()
            .unwrap_or_else(|| "Unknown Client".to_string())
    }
}

/// MCP JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version field, required on the wire but never read
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

/// Initialize request parameters
#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information
#[derive(Debug, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// MCP JSON-RPC 2.0 response structure
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP Error structure
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: String,
    pub message: String,
}

/// MCP Tool call arguments
#[derive(Debug, Deserialize)]
pub struct ToolCallArgs {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// resources/read arguments
#[derive(Debug, Deserialize)]
pub struct ResourceReadArgs {
    pub uri: String,
}

/// MCP Content item
#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub r#type: String,
    pub text: String,
}

/// MCP Tool result
#[derive(Debug, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentItem>,
}

/// Entry of resources/list
#[derive(Debug, Serialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub description: String,
}

/// Body of one resource returned by resources/read
#[derive(Debug, Serialize)]
pub struct ResourceContent {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: &str, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(content)],
        }
    }
}

impl ContentItem {
    /// Helper to create plain text content
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            r#type: "text".to_string(),
            text: content.into(),
        }
    }
}

/// Parse MCP request from JSON string
pub fn parse_request(json: &str) -> Result<McpRequest> {
    let request: McpRequest = serde_json::from_str(json)?;
    Ok(request)
}

/// Serialize MCP response to JSON string
pub fn serialize_response(response: &McpResponse) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}

/// Handle stdio MCP communication
pub async fn handle_stdio<S: IconSource>(mut context: ServerContext<S>) -> Result<()> {
    info!("Starting hugeicons MCP server on stdio");

    let stdin = tokio::io::stdin();
    let mut reader = AsyncBufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = reader.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("Received request: {}", line);

        let response = match parse_request(&line) {
            Ok(request) if is_notification(&request) => {
                debug!("Notification: {}", request.method);
                continue;
            }
            Ok(request) => handle_request(request, &mut context).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::error(None, "parse_error", &format!("Invalid JSON: {}", e))
            }
        };

        let response_json = serialize_response(&response)?;
        debug!("Sending response: {}", response_json);

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// Notifications carry no id and never get a response
fn is_notification(request: &McpRequest) -> bool {
    request.id.is_none() && request.method.starts_with("notifications/")
}

/// Handle a single MCP request
async fn handle_request<S: IconSource>(
    request: McpRequest,
    context: &mut ServerContext<S>,
) -> McpResponse {
    match request.method.as_str() {
        "initialize" => handle_initialize(request, context),
        "ping" => McpResponse::success(request.id, serde_json::json!({})),
        "tools/call" => handle_tool_call(request, context).await,
        "tools/list" => handle_tools_list(request),
        "resources/list" => handle_resources_list(request),
        "resources/read" => handle_resources_read(request, context).await,
        _ => McpResponse::error(
            request.id,
            "method_not_found",
            &format!("Method '{}' not found", request.method),
        ),
    }
}

/// Handle tools/call method
async fn handle_tool_call<S: IconSource>(
    request: McpRequest,
    context: &ServerContext<S>,
) -> McpResponse {
    let args: ToolCallArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    debug!("Tool call '{}' from {}", args.name, context.get_client_name());

    use crate::tools::{glyphs, list_icons, search, usage};
    match args.name.as_str() {
        "list_icons" => {
            list_icons::handle_list_icons(request.id, args.arguments, &context.catalog).await
        }
        "search_icons" => search::handle_search(request.id, args.arguments, &context.catalog).await,
        "get_platform_usage" => usage::handle_platform_usage(request.id, args.arguments),
        "get_icon_glyphs" => {
            glyphs::handle_glyphs(request.id, args.arguments, &context.glyphs).await
        }
        "get_icon_glyph_by_style" => {
            glyphs::handle_glyph_by_style(request.id, args.arguments, &context.glyphs).await
        }
        _ => McpResponse::error(
            request.id,
            "tool_not_found",
            &format!("Tool '{}' not found", args.name),
        ),
    }
}

/// Handle tools/list method
fn handle_tools_list(request: McpRequest) -> McpResponse {
    let tools = build_tools_array();

    McpResponse::success(request.id, serde_json::json!({ "tools": tools }))
}

/// Handle initialize method
fn handle_initialize<S: IconSource>(
    request: McpRequest,
    context: &mut ServerContext<S>,
) -> McpResponse {
    if let Some(params) = request.params {
        if let Ok(init_params) = serde_json::from_value::<InitializeParams>(params) {
            context.client_info = init_params.client_info;
        }
    }

    let client_version = context
        .client_info
        .as_ref()
        .and_then(|info| info.version.clone())
        .unwrap_or_default();
    info!(
        "Initialized session with {} {}",
        context.get_client_name(),
        client_version
    );

    let tools = build_tools_array();
    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "serverInfo": {
            "name": "hugeicons-mcp",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "capabilities": {
            "tools": { "list": true, "call": true },
            "resources": { "list": true, "read": true }
        },
        "tools": tools
    });
    McpResponse::success(request.id, result)
}

/// Handle resources/list method
fn handle_resources_list(request: McpRequest) -> McpResponse {
    let mut resources: Vec<ResourceDescriptor> = Platform::ALL
        .iter()
        .map(|platform| ResourceDescriptor {
            uri: format!("{}{}", PLATFORM_DOCS_PREFIX, platform.as_str()),
            name: format!("{} Usage Guide", platform.display_name()),
            mime_type: "text/markdown".to_string(),
            description: format!(
                "{} implementation guide for Hugeicons",
                platform.display_name()
            ),
        })
        .collect();
    resources.push(ResourceDescriptor {
        uri: ICONS_INDEX_URI.to_string(),
        name: "Icons Index".to_string(),
        mime_type: "application/json".to_string(),
        description: "Complete index of all Hugeicons".to_string(),
    });

    McpResponse::success(request.id, serde_json::json!({ "resources": resources }))
}

/// Handle resources/read method
async fn handle_resources_read<S: IconSource>(
    request: McpRequest,
    context: &ServerContext<S>,
) -> McpResponse {
    let args: ResourceReadArgs = match serde_json::from_value(request.params.unwrap_or_default()) {
        Ok(args) => args,
        Err(e) => {
            return McpResponse::error(
                request.id,
                "invalid_params",
                &format!("Invalid parameters: {}", e),
            )
        }
    };

    match read_resource(&args.uri, context).await {
        Ok(content) => McpResponse::success(
            request.id,
            serde_json::json!({ "contents": [content] }),
        ),
        Err(ResourceError::NotFound(message)) => {
            McpResponse::error(request.id, "resource_not_found", &message)
        }
        Err(ResourceError::App(e)) => McpResponse::error(request.id, e.error_code(), &e.message()),
    }
}

enum ResourceError {
    NotFound(String),
    App(AppError),
}

async fn read_resource<S: IconSource>(
    uri: &str,
    context: &ServerContext<S>,
) -> std::result::Result<ResourceContent, ResourceError> {
    if let Some(name) = uri.strip_prefix(PLATFORM_DOCS_PREFIX) {
        let platform = Platform::parse(name).ok_or_else(|| {
            ResourceError::NotFound(format!(
                "Platform documentation not found for: {} (supported: {})",
                name,
                Platform::supported()
            ))
        })?;
        return Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "text/markdown".to_string(),
            text: platform.usage().to_markdown(),
        });
    }

    if uri == ICONS_INDEX_URI {
        let icons = context.catalog.icons().await.map_err(ResourceError::App)?;
        let text = serde_json::to_string_pretty(icons.as_slice())
            .map_err(|e| ResourceError::App(AppError::from(e)))?;
        return Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: "application/json".to_string(),
            text,
        });
    }

    Err(ResourceError::NotFound(format!("Resource not found: {}", uri)))
}

/// Build the tools array returned from tools/list and initialize
fn build_tools_array() -> serde_json::Value {
    use crate::cli::{GlyphArgs, GlyphsArgs, ListIconsArgs, SearchArgs, UsageArgs};
    use schemars::schema_for;

    // Generate JSON schemas from the CLI argument structs
    let list_schema = schema_for!(ListIconsArgs);
    let search_schema = schema_for!(SearchArgs);
    let usage_schema = schema_for!(UsageArgs);
    let glyphs_schema = schema_for!(GlyphsArgs);
    let glyph_schema = schema_for!(GlyphArgs);

    serde_json::json!([
        {
            "name": "list_icons",
            "description": "Get a list of all available Hugeicons icons",
            "inputSchema": list_schema
        },
        {
            "name": "search_icons",
            "description": "Search for icons by name, tags or category. Use commas to search for several icons at once",
            "inputSchema": search_schema
        },
        {
            "name": "get_platform_usage",
            "description": "Get platform-specific usage instructions for Hugeicons",
            "inputSchema": usage_schema
        },
        {
            "name": "get_icon_glyphs",
            "description": "Get all glyphs (unicode characters) for a specific icon across all available styles",
            "inputSchema": glyphs_schema
        },
        {
            "name": "get_icon_glyph_by_style",
            "description": "Get the glyph (unicode character) for a specific icon with a particular style",
            "inputSchema": glyph_schema
        }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hugeicons::provider::test_support::{sample_icons, StaticSource};
    use serde_json::json;

    fn context() -> ServerContext<StaticSource> {
        let glyphs = HugeiconsClient::new(&ServerConfig::default()).unwrap();
        ServerContext::new(IconCatalog::new(StaticSource::new(sample_icons())), glyphs)
    }

    fn request(method: &str, params: Option<Value>) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".into(),
            id: Some(json!(1)),
            method: method.into(),
            params,
        }
    }

    async fn call(method: &str, params: Option<Value>) -> McpResponse {
        handle_request(request(method, params), &mut context()).await
    }

    #[tokio::test]
    async fn test_initialize_response_contains_fields() {
        let mut context = context();
        let req = request(
            "initialize",
            Some(json!({ "clientInfo": { "name": "inspector", "version": "1.2" } })),
        );
        let resp = handle_request(req, &mut context).await;
        assert!(resp.error.is_none());
        assert_eq!(context.get_client_name(), "inspector");

        let result = resp.result.expect("result present");
        assert_eq!(result["serverInfo"]["name"], "hugeicons-mcp");
        assert_eq!(result["capabilities"]["tools"]["list"], true);
        assert_eq!(result["capabilities"]["resources"]["read"], true);
        assert_eq!(result["tools"].as_array().map(|t| t.len()), Some(5));
    }

    #[tokio::test]
    async fn test_tools_list_names() {
        let resp = call("tools/list", None).await;
        let result = resp.result.expect("result present");
        let names: Vec<&str> = result["tools"]
            .as_array()
            .expect("tools array")
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "list_icons",
                "search_icons",
                "get_platform_usage",
                "get_icon_glyphs",
                "get_icon_glyph_by_style"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_method_and_tool() {
        let resp = call("prompts/list", None).await;
        assert_eq!(resp.error.unwrap().code, "method_not_found");

        let resp = call("tools/call", Some(json!({ "name": "draw_icon", "arguments": {} }))).await;
        let error = resp.error.unwrap();
        assert_eq!(error.code, "tool_not_found");
        assert_eq!(error.message, "Tool 'draw_icon' not found");

        let resp = call("tools/call", None).await;
        assert_eq!(resp.error.unwrap().code, "invalid_params");
    }

    #[tokio::test]
    async fn test_tools_call_search_icons() {
        let resp = call(
            "tools/call",
            Some(json!({ "name": "search_icons", "arguments": { "query": "chart up" } })),
        )
        .await;
        let result = resp.result.expect("result present");
        assert_eq!(result["content"][0]["type"], "text");
        let icons: Value =
            serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(icons[0]["name"], "chart-up");
        assert_eq!(icons.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tools_call_platform_usage() {
        let resp = call(
            "tools/call",
            Some(json!({ "name": "get_platform_usage", "arguments": { "platform": "flutter" } })),
        )
        .await;
        let text = resp.result.unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.contains("hugeicons: ^0.0.10"));
    }

    #[tokio::test]
    async fn test_resources_list() {
        let resp = call("resources/list", None).await;
        let result = resp.result.unwrap();
        let resources = result["resources"].as_array().unwrap();
        assert_eq!(resources.len(), 7);
        assert_eq!(resources[0]["uri"], "hugeicons://docs/platforms/react");
        assert_eq!(resources[4]["name"], "React Native Usage Guide");
        assert_eq!(resources[6]["uri"], ICONS_INDEX_URI);
        assert_eq!(resources[6]["mimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_resources_read_platform_markdown() {
        let resp = call(
            "resources/read",
            Some(json!({ "uri": "hugeicons://docs/platforms/svelte" })),
        )
        .await;
        let result = resp.result.unwrap();
        assert_eq!(result["contents"][0]["mimeType"], "text/markdown");
        assert!(result["contents"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("# Svelte Usage Guide"));
    }

    #[tokio::test]
    async fn test_resources_read_icons_index() {
        let resp = call("resources/read", Some(json!({ "uri": ICONS_INDEX_URI }))).await;
        let result = resp.result.unwrap();
        let icons: Value =
            serde_json::from_str(result["contents"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(icons.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_resources_read_unknown() {
        let resp = call(
            "resources/read",
            Some(json!({ "uri": "hugeicons://docs/platforms/html" })),
        )
        .await;
        let error = resp.error.unwrap();
        assert_eq!(error.code, "resource_not_found");
        assert_eq!(
            error.message,
            "Platform documentation not found for: html \
             (supported: react, vue, angular, svelte, react-native, flutter)"
        );

        let resp = call("resources/read", Some(json!({ "uri": "file:///etc/passwd" }))).await;
        assert_eq!(resp.error.unwrap().code, "resource_not_found");
    }

    #[test]
    fn test_notifications_are_detected() {
        let mut req = request("notifications/initialized", None);
        req.id = None;
        assert!(is_notification(&req));
        assert!(!is_notification(&request("notifications/initialized", None)));
    }

    #[test]
    fn test_parse_and_serialize() {
        let req = parse_request(r#"{"jsonrpc":"2.0","id":5,"method":"tools/list"}"#).unwrap();
        assert_eq!(req.method, "tools/list");
        assert!(parse_request("not json").is_err());

        let json = serialize_response(&McpResponse::error(None, "parse_error", "bad")).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":"parse_error","message":"bad"}}"#
        );
    }
}
