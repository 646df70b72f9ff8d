use std::sync::Mutex;

use tracing::{info, warn};

use crate::errors::ValidationError;
use crate::types::{render_path, ContactPath};

/// Sink for the observable side effects of a search.
///
/// The engine never fails a query on bad input; it hands the validation
/// failure to the reporter and returns an empty result.
pub trait SearchReporter: Send + Sync {
    /// Called when a query is rejected before traversal.
    fn validation_failed(&self, error: &ValidationError);

    /// Called with the final result of a source-to-destination search.
    fn paths_found(&self, source: &str, destination: &str, paths: &[ContactPath]);
}

/// Reporter that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SearchReporter for TracingReporter {
    fn validation_failed(&self, error: &ValidationError) {
        warn!(%error, "search request rejected");
    }

    fn paths_found(&self, source: &str, destination: &str, paths: &[ContactPath]) {
        info!(
            "{} paths found from {} to {}",
            paths.len(),
            source,
            destination
        );
        for path in paths {
            info!("{}", render_path(path));
        }
    }
}

/// A reported search event, as captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Rejected(ValidationError),
    Found {
        source: String,
        destination: String,
        count: usize,
    },
}

/// Reporter that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<SearchEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all events recorded so far.
    pub fn events(&self) -> Vec<SearchEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Returns only the validation failures.
    pub fn rejections(&self) -> Vec<ValidationError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SearchEvent::Rejected(err) => Some(err),
                SearchEvent::Found { .. } => None,
            })
            .collect()
    }

    fn push(&self, event: SearchEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl SearchReporter for RecordingReporter {
    fn validation_failed(&self, error: &ValidationError) {
        self.push(SearchEvent::Rejected(error.clone()));
    }

    fn paths_found(&self, source: &str, destination: &str, paths: &[ContactPath]) {
        self.push(SearchEvent::Found {
            source: source.to_string(),
            destination: destination.to_string(),
            count: paths.len(),
        });
    }
}
