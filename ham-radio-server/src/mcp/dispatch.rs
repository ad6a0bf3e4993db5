//! JSON-RPC method routing.

use serde_json::json;

use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams};
use super::tools::{self, ToolContext};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "ham-radio-server";

/// Dispatch a request to its handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, ctx: &ToolContext) -> Option<JsonRpcResponse> {
    let id = req.id.clone();
    match req.method.as_str() {
        "initialize" => Some(JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )),

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(id, json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(
            id,
            json!({ "tools": tools::tool_definitions() }),
        )),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let result = tools::call_tool(ctx, &params).await;
            Some(match serde_json::to_value(&result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
            })
        }

        // Unknown notifications are ignored
        _ if req.id.is_none() => None,

        other => Some(JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))),
    }
}
