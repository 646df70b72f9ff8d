use std::io::Write;

use contactgraph::errors::ContactGraphError;
use contactgraph::graph::GraphStore;
use contactgraph::ingest::load_file;
use tempfile::{NamedTempFile, TempDir};

/// Helper: write `contents` to a temporary data file.
fn data_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp file");
    file
}

// ---------------------------------------------------------------------------
// Store maintenance
// ---------------------------------------------------------------------------

#[test]
fn test_adjacency_reflects_adds_and_removes() {
    let mut graph = GraphStore::new();
    for d in ["B", "F", "X", "F", "Y"] {
        graph.add_edge("A", d).unwrap();
    }
    assert_eq!(graph.adjacent_nodes("A"), ["B", "F", "X", "F", "Y"]);

    graph.remove_edge("A", "F").unwrap();
    assert_eq!(graph.adjacent_nodes("A"), ["B", "X", "Y"]);

    graph.add_edge("A", "F").unwrap();
    assert_eq!(graph.adjacent_nodes("A"), ["B", "X", "Y", "F"]);
}

#[test]
fn test_remove_edge_twice_is_harmless() {
    let mut graph = GraphStore::new();
    graph.add_edge("A", "B").unwrap();
    graph.add_edge("A", "C").unwrap();

    graph.remove_edge("A", "B").unwrap();
    let after_first = graph.adjacent_nodes("A").to_vec();
    graph.remove_edge("A", "B").unwrap();
    assert_eq!(graph.adjacent_nodes("A"), after_first.as_slice());
}

#[test]
fn test_counts() {
    let mut graph = GraphStore::new();
    graph.add_edge("A", "B").unwrap();
    graph.add_edge("A", "B").unwrap();
    graph.add_edge("B", "C").unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_unknown_node_lookups() {
    let graph = GraphStore::new();
    assert!(graph.adjacent_nodes("ghost").is_empty());
    assert!(!graph.existing_node("ghost"));
    assert!(matches!(
        graph.find_edge("ghost", "A"),
        Err(ContactGraphError::UnknownNode { .. })
    ));
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_load_valid_file() {
    let file = data_file("DOUG,JOE\nDOUG,ANN\nANN,JOE\n");
    let mut graph = GraphStore::new();

    let count = load_file(&mut graph, file.path())
        .await
        .expect("load should succeed");
    assert_eq!(count, 3);
    assert_eq!(graph.adjacent_nodes("DOUG"), ["JOE", "ANN"]);
    assert!(graph.find_edge("ANN", "JOE").unwrap());
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut graph = GraphStore::new();

    let err = load_file(&mut graph, &dir.path().join("does-not-exist.txt"))
        .await
        .unwrap_err();
    match err {
        ContactGraphError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_load_malformed_file_leaves_store_untouched() {
    let file = data_file("A,B\nB,C\nC,D,E\nD,E\n");
    let mut graph = GraphStore::new();
    graph.add_edge("X", "Y").unwrap();

    let err = load_file(&mut graph, file.path()).await.unwrap_err();
    match err {
        ContactGraphError::MalformedEntry { line, content, .. } => {
            assert_eq!(line, 3);
            assert_eq!(content, "C,D,E");
        }
        other => panic!("expected MalformedEntry, got {other:?}"),
    }
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 1);
    assert!(!graph.existing_node("C"));
}

#[tokio::test]
async fn test_load_appends_to_existing_edges() {
    let file = data_file("A,C\n");
    let mut graph = GraphStore::new();
    graph.add_edge("A", "B").unwrap();

    load_file(&mut graph, file.path()).await.unwrap();
    assert_eq!(graph.adjacent_nodes("A"), ["B", "C"]);
}

#[test]
fn test_read_data_from_reader() {
    let mut graph = GraphStore::new();
    let input = "A,B\r\nA,C\r\n";
    let count = graph.read_data(input.as_bytes()).unwrap();
    assert_eq!(count, 2);
    assert_eq!(graph.adjacent_nodes("A"), ["B", "C"]);
}

#[test]
fn test_read_data_blank_line_is_malformed() {
    let mut graph = GraphStore::new();
    let err = graph.read_data("A,B\n\nB,C\n".as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        ContactGraphError::MalformedEntry { line: 2, .. }
    ));
}
