//! JSON-RPC 2.0 query server over stdio.
//!
//! Exposes path search, network reveal and graph size as tools, in the
//! shape MCP clients expect (`initialize`, `tools/list`, `tools/call`).

/// Request loop and method dispatch.
pub mod server;

/// Tool definitions and handlers.
pub mod tools;

/// JSON-RPC 2.0 message types.
pub mod transport;

pub use server::McpServer;
pub use tools::{get_tool_definitions, handle_tool_call, ToolDefinition};
pub use transport::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
