use std::fmt;
use std::mem::size_of;

use serde::Serialize;

use crate::degree::DegreeIndex;
use crate::graph::{DenseIndex, Graph, NodeId};

/// One id-map bucket: `(NodeId, DenseIndex)` padded to 16 bytes, one control
/// byte, and 1/8 slack for the map's maximum load factor.
const ID_MAP_ENTRY_BYTES: usize = (16 + 1) * 8 / 7;

/// Analytic storage footprint for a graph with the given counts.
///
/// Covers the CSR offsets and targets, the dense-to-original id table, the
/// original-to-dense id map and the degree index. Allocator slack is ignored.
pub fn estimate_bytes(node_count: usize, edge_count: usize) -> usize {
    let offsets = (node_count + 1) * size_of::<usize>();
    let targets = edge_count * size_of::<DenseIndex>();
    let ids = node_count * size_of::<NodeId>();
    let index = node_count * ID_MAP_ENTRY_BYTES;

    offsets + targets + ids + index + size_of::<DegreeIndex>()
}

pub(crate) fn bytes_to_mb(bytes: usize) -> usize {
    bytes / (1024 * 1024)
}

/// Structured statistics for the loaded graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_estimate_bytes: usize,
    /// `None` only for a graph with no nodes.
    pub max_degree_node: Option<NodeId>,
    pub max_degree: usize,
    pub min_degree: usize,
    pub sink_count: usize,
    pub average_degree: f64,
}

impl Summary {
    pub fn of(graph: &Graph) -> Self {
        let degrees = graph.degree_index();
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        Summary {
            node_count,
            edge_count,
            memory_estimate_bytes: graph.memory_usage(),
            max_degree_node: graph.max_degree_node().map(|(id, _)| id),
            max_degree: degrees.max_degree(),
            min_degree: degrees.min_degree(),
            sink_count: degrees.sink_count(),
            average_degree: if node_count == 0 {
                0.0
            } else {
                edge_count as f64 / node_count as f64
            },
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Graph statistics ===")?;
        writeln!(f, "Nodes:            {}", self.node_count)?;
        writeln!(f, "Edges:            {}", self.edge_count)?;
        writeln!(
            f,
            "Memory estimate:  {:.2} MB ({} bytes)",
            self.memory_estimate_bytes as f64 / 1_048_576.0,
            self.memory_estimate_bytes
        )?;
        match self.max_degree_node {
            Some(node) => writeln!(f, "Max out-degree:   {} (node {})", self.max_degree, node)?,
            None => writeln!(f, "Max out-degree:   -")?,
        }
        writeln!(f, "Min out-degree:   {}", self.min_degree)?;
        writeln!(f, "Sinks:            {}", self.sink_count)?;
        write!(f, "Avg out-degree:   {:.3}", self.average_degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_is_linear_in_edges_not_ids() {
        let base = estimate_bytes(10, 10);
        assert_eq!(estimate_bytes(10, 20) - base, 10 * size_of::<DenseIndex>());
        assert!(estimate_bytes(0, 0) > 0);
    }

    #[test]
    fn test_huge_ids_do_not_inflate_estimate() {
        let small = Graph::from_edges([(0, 1), (1, 2)]).unwrap();
        let sparse = Graph::from_edges([(0, 10_000_000), (10_000_000, u64::MAX)]).unwrap();
        assert_eq!(small.memory_usage(), sparse.memory_usage());
    }

    #[test]
    fn test_summary_of_sample() {
        let g = Graph::from_edges([(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]).unwrap();
        let s = Summary::of(&g);
        assert_eq!(s.node_count, 5);
        assert_eq!(s.edge_count, 5);
        assert_eq!(s.max_degree_node, Some(0));
        assert_eq!(s.max_degree, 2);
        assert_eq!(s.min_degree, 0);
        assert_eq!(s.sink_count, 1);
        assert!((s.average_degree - 1.0).abs() < f64::EPSILON);
        assert_eq!(s.memory_estimate_bytes, estimate_bytes(5, 5));
    }

    #[test]
    fn test_display() {
        let g = Graph::from_edges([(0, 1)]).unwrap();
        let text = Summary::of(&g).to_string();
        assert!(text.starts_with("=== Graph statistics ==="));
        assert!(text.contains("Nodes:            2"));
        assert!(text.contains("Max out-degree:   1 (node 0)"));
    }

    #[test]
    fn test_summary_serializes() {
        let g = Graph::from_edges([(3, 4)]).unwrap();
        let json = serde_json::to_value(Summary::of(&g)).unwrap();
        assert_eq!(json["node_count"], 2);
        assert_eq!(json["max_degree_node"], 3);
    }
}
