//! Tool definitions and dispatch for the contact graph server.
//!
//! Each tool wraps one query of [`PathSearchEngine`]. Arguments that are
//! missing or not strings are passed on as missing, so the engine reports
//! them and answers with an empty result instead of a protocol error.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::errors::{ContactGraphError, Result};
use crate::graph::PathSearchEngine;
use crate::types::{ContactPath, SearchConditions, SearchType};

/// A tool exposed through `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "contacts_search".to_string(),
            description: "Find paths between two people. Defaults to the shortest connections.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "source": { "type": "string", "description": "Name of the starting node" },
                    "destination": { "type": "string", "description": "Name of the target node" },
                    "searchType": {
                        "type": "string",
                        "enum": ["shortestPath", "allPaths"],
                        "description": "Which paths to return (default: shortestPath)"
                    }
                },
                "required": ["source", "destination"]
            }),
        },
        ToolDefinition {
            name: "contacts_reveal".to_string(),
            description: "Reveal the network reachable from a person within the configured depth.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "node": { "type": "string", "description": "Name of the node to expand" }
                },
                "required": ["node"]
            }),
        },
        ToolDefinition {
            name: "contacts_node_count".to_string(),
            description: "Return the number of known nodes and edges.".to_string(),
            input_schema: json!({ "type": "object", "properties": {} }),
        },
    ]
}

/// Dispatches a `tools/call` to the matching handler.
pub fn handle_tool_call(
    engine: &PathSearchEngine<'_>,
    server: &ServerConfig,
    tool_name: &str,
    args: &Value,
) -> Result<Value> {
    let payload = match tool_name {
        "contacts_search" => handle_search(engine, args),
        "contacts_reveal" => handle_reveal(engine, server, args),
        "contacts_node_count" => json!({
            "nodes": engine.graph().node_count(),
            "edges": engine.graph().edge_count(),
        }),
        _ => {
            return Err(ContactGraphError::InvalidArgument {
                message: format!("unknown tool: {}", tool_name),
            })
        }
    };

    Ok(json!({
        "content": [{ "type": "text", "text": serde_json::to_string(&payload)? }],
        "structuredContent": payload,
    }))
}

fn string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn handle_search(engine: &PathSearchEngine<'_>, args: &Value) -> Value {
    let conditions = SearchConditions {
        source: string_arg(args, "source"),
        destination: string_arg(args, "destination"),
        search_type: Some(
            string_arg(args, "searchType")
                .unwrap_or_else(|| SearchType::ShortestPath.as_str().to_string()),
        ),
    };
    let paths = engine.get_paths(&conditions);
    search_response(&paths)
}

fn handle_reveal(engine: &PathSearchEngine<'_>, server: &ServerConfig, args: &Value) -> Value {
    let node = string_arg(args, "node").unwrap_or_default();
    let paths = engine.reveal_contacts(&node);
    reveal_response(&paths, server.max_results)
}

/// Shapes a path-search result.
pub fn search_response(paths: &[ContactPath]) -> Value {
    json!({ "count": paths.len(), "paths": paths })
}

/// Shapes a reveal result: `numPaths` counts every contact (the leading
/// self path excluded) and `paths` lists at most `limit` of them.
pub fn reveal_response(paths: &[ContactPath], limit: usize) -> Value {
    let contacts = paths.get(1..).unwrap_or(&[]);
    let shown: Vec<&ContactPath> = contacts.iter().take(limit).collect();
    json!({ "numPaths": contacts.len(), "paths": shown })
}
