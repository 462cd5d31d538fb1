use std::io::Write;

use neuronet_core::{Engine, EngineConfig, GraphError};
use tempfile::{tempdir, NamedTempFile};

const REFERENCE: &str = "0 1\n0 2\n1 3\n2 3\n3 4\n";

fn dataset(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_reference_dataset() {
    let file = dataset(REFERENCE);
    let mut engine = Engine::default();
    let report = engine.load(file.path()).unwrap();

    assert_eq!(report.node_count, 5);
    assert_eq!(report.edge_count, 5);
    assert_eq!(engine.bfs(0, 1).unwrap(), vec![0, 1, 2]);
    assert_eq!(engine.bfs(0, 2).unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(engine.induced_edges(&[0, 1, 2]).unwrap(), vec![(0, 1), (0, 2)]);
    assert_eq!(engine.max_degree_node().unwrap(), (0, 2));
    assert_eq!(engine.status().source.as_deref(), Some(file.path()));
}

#[test]
fn missing_file_keeps_prior_graph() {
    let file = dataset(REFERENCE);
    let dir = tempdir().unwrap();
    let mut engine = Engine::default();
    engine.load(file.path()).unwrap();

    let err = engine.load(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, GraphError::Io { .. }));
    assert!(err.to_string().contains("missing.txt"));

    assert_eq!(engine.node_count().unwrap(), 5);
    assert_eq!(engine.neighbors(0).unwrap(), vec![1, 2]);
    assert_eq!(engine.bfs(0, 2).unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn missing_file_before_any_load() {
    let dir = tempdir().unwrap();
    let mut engine = Engine::default();
    assert!(engine.load(dir.path().join("missing.txt")).is_err());
    assert!(matches!(engine.summary(), Err(GraphError::NoGraphLoaded)));
}

#[test]
fn malformed_file_reports_line_and_keeps_prior_graph() {
    let good = dataset(REFERENCE);
    let bad = dataset("# header\n7 8\n7 eight\n");
    let mut engine = Engine::default();
    engine.load(good.path()).unwrap();

    match engine.load(bad.path()).unwrap_err() {
        GraphError::Format { line, .. } => assert_eq!(line, 3),
        other => panic!("expected format error, got {other:?}"),
    }
    assert!(!engine.has_node(7).unwrap());
    assert_eq!(engine.edge_count().unwrap(), 5);
}

#[test]
fn snap_style_file_with_sparse_ids() {
    let file = dataset(
        "# Directed graph: web-sample.txt\n\
         # FromNodeId\tToNodeId\n\
         10000000\t42\n\
         42\t10000000\n\
         42\t7\n",
    );
    let mut engine = Engine::default();
    engine.load(file.path()).unwrap();

    assert_eq!(engine.node_count().unwrap(), 3);
    assert_eq!(engine.degree(42).unwrap(), 2);
    assert_eq!(engine.max_degree_node().unwrap(), (42, 2));
    assert_eq!(engine.bfs(10_000_000, 2).unwrap(), vec![10_000_000, 42, 7]);
    // Three nodes cost the same no matter how large the ids are.
    assert!(engine.memory_estimate_bytes().unwrap() < 1024);
}

#[test]
fn reload_switches_graph() {
    let first = dataset(REFERENCE);
    let second = dataset("5 6\n6 5\n");
    let mut engine = Engine::default();
    engine.load(first.path()).unwrap();
    engine.load(second.path()).unwrap();

    assert_eq!(engine.node_count().unwrap(), 2);
    assert!(matches!(engine.degree(0), Err(GraphError::UnknownNode(0))));
    assert_eq!(engine.bfs(5, 10).unwrap(), vec![5, 6]);
    assert_eq!(engine.status().loads, 2);
}

#[test]
fn memory_cap_from_config() {
    let edges: String = (0..200_000u64).map(|i| format!("{i} {}\n", i + 1)).collect();
    let file = dataset(&edges);
    let config = EngineConfig::default().with_max_memory_mb(64);
    let mut engine = Engine::new(config);
    // ~200k nodes stay far below 64MB.
    engine.load(file.path()).unwrap();
    assert_eq!(engine.edge_count().unwrap(), 200_000);
}
