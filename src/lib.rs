pub mod config;
pub mod errors;
pub mod graph;
pub mod ingest;
pub mod logging;
pub mod mcp;
pub mod types;
