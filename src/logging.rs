use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "CONTACTGRAPH_LOG";

/// Builds the filter directive for a configured level.
///
/// Plain levels (`info`) are scoped to this crate; full directives
/// (`contactgraph=debug,tokio=warn`) pass through unchanged.
pub fn filter_directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("contactgraph={}", level)
    }
}

/// Installs the global subscriber. Logs go to stderr so that stdout stays
/// free for query output and the JSON-RPC stream.
pub fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_level_is_scoped_to_crate() {
        assert_eq!(filter_directive("debug"), "contactgraph=debug");
    }

    #[test]
    fn full_directive_passes_through() {
        assert_eq!(
            filter_directive("contactgraph=trace,tokio=warn"),
            "contactgraph=trace,tokio=warn"
        );
    }
}
