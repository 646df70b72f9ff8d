/// Adjacency-list storage and edge mutation.
pub mod store;

/// Path search and network discovery over a store.
pub mod traversal;

/// Reporting sinks for search side effects.
pub mod reporter;

pub use reporter::{RecordingReporter, SearchEvent, SearchReporter, TracingReporter};
pub use store::GraphStore;
pub use traversal::PathSearchEngine;
