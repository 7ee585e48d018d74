//! MCP (Model Context Protocol) server implementation

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tavilykit::{ApiClient, CancellationToken, TavilyError, Tool, ToolKind};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

/// JSON-RPC 2.0 request
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// MCP Server implementation
struct McpServer {
    tool: Tool,
    shutdown: CancellationToken,
}

impl McpServer {
    fn new(tool: Tool, shutdown: CancellationToken) -> Self {
        Self { tool, shutdown }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "tavilykit",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools: Vec<Value> = ToolKind::ALL
            .iter()
            .map(|kind| {
                json!({
                    "name": kind.name(),
                    "description": kind.description(),
                    "inputSchema": kind.input_schema()
                })
            })
            .collect();

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        debug!(tool = tool_name, "Calling tool");
        let token = self.shutdown.child_token();

        match self.tool.call(tool_name, arguments, &token).await {
            Ok(text) => JsonRpcResponse::success(
                id,
                json!({
                    "content": [{
                        "type": "text",
                        "text": text
                    }]
                }),
            ),
            Err(e @ (TavilyError::UnknownTool(_) | TavilyError::InvalidArguments(_))) => {
                JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string())
            }
            Err(e) => {
                warn!(tool = tool_name, error = %e, "Tool call failed");
                JsonRpcResponse::success(
                    id,
                    json!({
                        "content": [{
                            "type": "text",
                            "text": format!("Error: {}", e)
                        }],
                        "isError": true
                    }),
                )
            }
        }
    }
}

/// Run the MCP server over stdio until stdin closes or the token is cancelled
pub async fn run_server(client: ApiClient, shutdown: CancellationToken) -> io::Result<()> {
    let tool = Tool::builder()
        .api(client)
        .build()
        .map_err(io::Error::other)?;
    let server = McpServer::new(tool, shutdown.clone());

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(request) => {
                // Notifications get no response
                if request.id.is_none() && request.method.starts_with("notifications/") {
                    continue;
                }
                server.handle_request(request).await
            }
            Err(e) => JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e)),
        };

        let json = serde_json::to_string(&response).unwrap_or_default();
        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavilykit::ClientConfig;

    fn server() -> McpServer {
        let client = ApiClient::new(&ClientConfig::new("k").base_address("http://127.0.0.1:1"))
            .unwrap();
        let tool = Tool::builder().api(client).build().unwrap();
        McpServer::new(tool, CancellationToken::new())
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server().handle_request(request("initialize", json!({}))).await;
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "tavilykit");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = server().handle_request(request("tools/list", json!({}))).await;
        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["search", "extract", "crawl", "map", "usage"]);
        assert!(result["tools"][0]["inputSchema"]["properties"]["query"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server().handle_request(request("resources/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let response = server()
            .handle_request(request("tools/call", json!({"name": "browse"})))
            .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("Unknown tool: browse"));
    }

    #[tokio::test]
    async fn test_call_invalid_arguments() {
        let response = server()
            .handle_request(request(
                "tools/call",
                json!({"name": "extract", "arguments": {"urls": "not-a-list"}}),
            ))
            .await;
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_call_transport_failure_is_tool_error() {
        let response = server()
            .handle_request(request("tools/call", json!({"name": "usage"})))
            .await;
        let result = response.result.unwrap();
        assert_eq!(result["isError"], json!(true));
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Error:"));
    }
}
