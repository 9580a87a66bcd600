//! McpServer - JSON-RPC method dispatch

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolsCapability, INVALID_PARAMS, INVALID_REQUEST, MCP_PROTOCOL_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR,
};
use super::tools::ToolRegistry;

/// Dispatches MCP requests to the registered tools
#[derive(Debug)]
pub struct McpServer {
    info: ServerInfo,
    tools: ToolRegistry,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>, tools: ToolRegistry) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            tools,
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Handle one raw line; `None` means nothing is written back
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => Some(parse_error(e)),
            Ok(value) => match serde_json::from_value::<JsonRpcRequest>(value.clone()) {
                Ok(request) => self.handle(request).await,
                Err(e) => Some(JsonRpcResponse::error(
                    value.get("id").cloned(),
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                )),
            },
        }?;
        encode(&response)
    }

    /// Response for a line that could not even be decoded as text
    pub fn reject_line(&self, reason: impl std::fmt::Display) -> Option<String> {
        encode(&parse_error(reason))
    }

    /// Handle a parsed request; notifications get no response
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "Received request");

        if request.is_notification() {
            debug!(method = %request.method, "Notification acknowledged");
            return None;
        }

        let id = request.id.clone();
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => {
                JsonRpcResponse::success(id, json!({ "tools": self.tools.definitions() }))
            }
            "tools/call" => self.handle_call_tool(id, request.params).await,
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INVALID_REQUEST, e.to_string()),
        }
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let Some(handler) = self.tools.get(name) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", name));
        };

        let result = handler.call(arguments).await;
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
        }
    }
}

fn parse_error(reason: impl std::fmt::Display) -> JsonRpcResponse {
    JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", reason))
}

fn encode(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!(error = %e, "Failed to serialize response");
            None
        }
    }
}
