//! Edge-list ingestion.
//!
//! The input format is one `source,destination` pair per line. Line order
//! becomes adjacency order, which in turn decides traversal order.

use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::errors::{ContactGraphError, Result};
use crate::graph::GraphStore;

/// Splits one `A,B` line into its two node names.
///
/// `line_number` is 1-based and only used for error context.
pub fn parse_entry(line: &str, line_number: usize) -> Result<(String, String)> {
    let tokens: Vec<&str> = line.split(',').collect();
    match tokens.as_slice() {
        [source, destination] if !source.is_empty() && !destination.is_empty() => {
            Ok((source.to_string(), destination.to_string()))
        }
        [_, _] => Err(malformed(line, line_number, "empty node name")),
        _ => Err(malformed(
            line,
            line_number,
            "line does not follow expected format (A,B)",
        )),
    }
}

fn malformed(line: &str, line_number: usize, message: &str) -> ContactGraphError {
    ContactGraphError::MalformedEntry {
        line: line_number,
        content: line.to_string(),
        message: message.to_string(),
    }
}

/// Loads an edge-list file into `store`, returning the number of entries.
///
/// The file is read completely and validated before the store is touched.
pub async fn load_file(store: &mut GraphStore, path: &Path) -> Result<usize> {
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        error!(path = %path.display(), error = %e, "failed to open data file");
        ContactGraphError::Io(e)
    })?;

    let mut reader = BufReader::new(file).lines();
    let mut lines = Vec::new();
    while let Some(line) = reader.next_line().await? {
        lines.push(line);
    }

    store.apply_lines(&lines).inspect_err(|e| {
        error!(path = %path.display(), error = %e, "invalid data file");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_two_tokens() {
        let (s, d) = parse_entry("A,B", 1).unwrap();
        assert_eq!((s.as_str(), d.as_str()), ("A", "B"));
    }

    #[test]
    fn tokens_are_kept_verbatim() {
        let (s, d) = parse_entry("doug bartolomeo, Joe", 1).unwrap();
        assert_eq!(s, "doug bartolomeo");
        assert_eq!(d, " Joe");
    }

    #[test]
    fn rejects_wrong_token_counts() {
        for (line, n) in [("A,B,C", 4), ("AB", 7), ("", 9)] {
            match parse_entry(line, n) {
                Err(ContactGraphError::MalformedEntry { line: at, content, .. }) => {
                    assert_eq!(at, n);
                    assert_eq!(content, line);
                }
                other => panic!("expected MalformedEntry for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_empty_tokens() {
        assert!(parse_entry(",B", 1).is_err());
        assert!(parse_entry("A,", 1).is_err());
        assert!(parse_entry(",", 1).is_err());
    }
}
