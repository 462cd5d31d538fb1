use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{DenseIndex, Edge, Graph, NodeId};

/// A node reached during BFS, with its hop distance from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborResult {
    pub node_id: NodeId,
    pub distance: u32,
}

/// Result of a bounded BFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalResult {
    /// Visitation order. `neighbors[0]` is always the start node at distance 0.
    pub neighbors: Vec<NeighborResult>,
    /// Adjacency entries examined, counting edges to already-visited nodes.
    pub edges_scanned: usize,
}

impl TraversalResult {
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.neighbors.iter().map(|n| n.node_id).collect()
    }
}

/// Induced subgraph around a start node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgraphResult {
    /// BFS visitation order, start first.
    pub nodes: Vec<NodeId>,
    /// Origin-major, following `nodes` order.
    pub edges: Vec<Edge>,
}

/// Level-synchronous BFS from `start` following outgoing edges, up to
/// `max_depth` hops.
///
/// Each node is recorded once, at the first depth it is reached, and its
/// adjacency is scanned at most once. Cost is O(visited nodes + visited edges).
pub fn bfs_neighborhood(graph: &Graph, start: NodeId, max_depth: u32) -> Result<TraversalResult> {
    if max_depth < 1 {
        return Err(GraphError::InvalidArgument(format!(
            "max_depth must be >= 1, got {max_depth}"
        )));
    }
    let start_idx = graph.dense(start)?;
    let t = Instant::now();

    let mut visited: FxHashSet<DenseIndex> = FxHashSet::default();
    let mut queue: VecDeque<(DenseIndex, u32)> = VecDeque::new();
    let mut neighbors = Vec::new();
    let mut edges_scanned = 0usize;

    visited.insert(start_idx);
    queue.push_back((start_idx, 0));

    while let Some((current, depth)) = queue.pop_front() {
        neighbors.push(NeighborResult {
            node_id: graph.node_id(current),
            distance: depth,
        });

        if depth >= max_depth {
            continue;
        }

        let adjacency = graph.adjacency(current);
        edges_scanned += adjacency.len();
        for &target in adjacency {
            if visited.insert(target) {
                queue.push_back((target, depth + 1));
            }
        }
    }

    debug!(
        start,
        max_depth,
        found = neighbors.len(),
        edges_scanned,
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "bfs complete"
    );

    Ok(TraversalResult {
        neighbors,
        edges_scanned,
    })
}

/// Node ids reached by [`bfs_neighborhood`], in visitation order.
pub fn bfs(graph: &Graph, start: NodeId, max_depth: u32) -> Result<Vec<NodeId>> {
    Ok(bfs_neighborhood(graph, start, max_depth)?.node_ids())
}

/// Every edge whose origin and destination both lie in `nodes`.
///
/// Output is origin-major in the order of `nodes`, each origin's edges in
/// adjacency order. A node listed more than once contributes its edges once.
/// `nodes` need not be sorted; membership is a hash lookup per edge.
pub fn induced_edges(graph: &Graph, nodes: &[NodeId]) -> Result<Vec<Edge>> {
    let t = Instant::now();

    let mut members: FxHashSet<DenseIndex> =
        FxHashSet::with_capacity_and_hasher(nodes.len(), Default::default());
    let mut origins: Vec<DenseIndex> = Vec::with_capacity(nodes.len());
    for &id in nodes {
        let idx = graph.dense(id)?;
        if members.insert(idx) {
            origins.push(idx);
        }
    }

    let mut edges = Vec::new();
    for idx in origins {
        let from = graph.node_id(idx);
        for &target in graph.adjacency(idx) {
            if members.contains(&target) {
                edges.push((from, graph.node_id(target)));
            }
        }
    }

    debug!(
        nodes = members.len(),
        edges = edges.len(),
        elapsed_ms = t.elapsed().as_secs_f64() * 1000.0,
        "induced edges extracted"
    );

    Ok(edges)
}

/// BFS from `start` and return the visited nodes with their induced edges.
pub fn extract_subgraph(graph: &Graph, start: NodeId, max_depth: u32) -> Result<SubgraphResult> {
    let nodes = bfs(graph, start, max_depth)?;
    let edges = induced_edges(graph, &nodes)?;
    Ok(SubgraphResult { nodes, edges })
}
