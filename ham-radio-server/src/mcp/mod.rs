//! Model Context Protocol server exposing the radio tools.

mod dispatch;
mod format;
pub mod protocol;
mod server;
mod tools;

pub use server::{McpServer, ServerError};
pub use tools::{ToolContext, ToolError, call_tool, tool_definitions};
