use thiserror::Error;

/// Errors that can occur during contact graph operations.
#[derive(Error, Debug)]
pub enum ContactGraphError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("unknown node: {node}")]
    UnknownNode { node: String },

    #[error("malformed entry at line {line}: {message} (observed: {content:?})")]
    MalformedEntry {
        line: usize,
        content: String,
        message: String,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation failures inside query operations.
///
/// These are reported through a [`SearchReporter`](crate::graph::SearchReporter)
/// and the query returns an empty result; they are never returned as `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("source node missing or not a string")]
    MissingSource,

    #[error("source node '{0}' does not exist in the graph")]
    UnknownSource(String),

    #[error("destination node missing or not a string")]
    MissingDestination,

    #[error("node name missing or empty")]
    MissingNodeName,
}

/// Convenience alias for results using `ContactGraphError`.
pub type Result<T> = std::result::Result<T, ContactGraphError>;
