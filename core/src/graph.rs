use rustc_hash::FxHashMap;

use crate::degree::DegreeIndex;
use crate::error::{GraphError, Result};
use crate::stats;

/// Node identifier as it appears in the dataset. May be sparse.
pub type NodeId = u64;

/// Position of a node in the dense internal arrays.
pub(crate) type DenseIndex = u32;

/// A directed edge expressed in original identifiers.
pub type Edge = (NodeId, NodeId);

/// Immutable directed multigraph in compressed sparse row form.
///
/// Original ids are remapped to dense indices in order of first appearance,
/// so storage is proportional to the number of distinct nodes, not to the
/// largest id. `targets[offsets[i]..offsets[i + 1]]` holds the outgoing
/// neighbors of dense node `i` in insertion order.
#[derive(Debug)]
pub struct Graph {
    ids: Vec<NodeId>,
    index: FxHashMap<NodeId, DenseIndex>,
    offsets: Vec<usize>,
    targets: Vec<DenseIndex>,
    degrees: DegreeIndex,
}

impl Graph {
    /// Build a graph from an iterator of `(origin, destination)` pairs.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges = edges.into_iter();
        let mut builder = GraphBuilder::with_capacity(0, edges.size_hint().0);
        for (from, to) in edges {
            builder.push_edge(from, to)?;
        }
        Ok(builder.finish())
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Out-degree of `id`.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        let idx = self.dense(id)?;
        Ok(self.adjacency(idx).len())
    }

    /// Outgoing neighbors of `id` in file order. Empty for sinks.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let idx = self.dense(id)?;
        Ok(self
            .adjacency(idx)
            .iter()
            .map(|&t| self.node_id(t))
            .collect())
    }

    /// `(node, out_degree)` of the node with the greatest out-degree; ties go
    /// to the node that appeared first in the input. `None` for an empty graph.
    pub fn max_degree_node(&self) -> Option<(NodeId, usize)> {
        self.degrees
            .max()
            .map(|(idx, degree)| (self.node_id(idx), degree))
    }

    /// `(node, out_degree)` of the node with the smallest out-degree, first
    /// appearance wins ties.
    pub fn min_degree_node(&self) -> Option<(NodeId, usize)> {
        self.degrees
            .min()
            .map(|(idx, degree)| (self.node_id(idx), degree))
    }

    pub fn degree_index(&self) -> &DegreeIndex {
        &self.degrees
    }

    /// All node ids in order of first appearance.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }

    /// Every edge, origin-major in first-appearance order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.ids.len() as DenseIndex).flat_map(move |idx| {
            let from = self.node_id(idx);
            self.adjacency(idx)
                .iter()
                .map(move |&t| (from, self.node_id(t)))
        })
    }

    /// Approximate memory usage in bytes, derived from counts.
    pub fn memory_usage(&self) -> usize {
        stats::estimate_bytes(self.node_count(), self.edge_count())
    }

    pub(crate) fn dense(&self, id: NodeId) -> Result<DenseIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }

    #[inline]
    pub(crate) fn node_id(&self, idx: DenseIndex) -> NodeId {
        self.ids[idx as usize]
    }

    #[inline]
    pub(crate) fn adjacency(&self, idx: DenseIndex) -> &[DenseIndex] {
        let i = idx as usize;
        &self.targets[self.offsets[i]..self.offsets[i + 1]]
    }
}

/// Accumulates edges during a load, then freezes them into a [`Graph`].
///
/// Nothing here is visible to readers until [`GraphBuilder::finish`]
/// returns, so a load that fails midway leaves no trace.
#[derive(Debug, Default)]
pub(crate) struct GraphBuilder {
    ids: Vec<NodeId>,
    index: FxHashMap<NodeId, DenseIndex>,
    edges: Vec<(DenseIndex, DenseIndex)>,
}

impl GraphBuilder {
    pub(crate) fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            ids: Vec::with_capacity(node_count),
            index: FxHashMap::with_capacity_and_hasher(node_count, Default::default()),
            edges: Vec::with_capacity(edge_count),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn intern(&mut self, id: NodeId) -> Result<DenseIndex> {
        if let Some(&idx) = self.index.get(&id) {
            return Ok(idx);
        }
        let idx = DenseIndex::try_from(self.ids.len()).map_err(|_| {
            GraphError::InvalidArgument(format!(
                "more than {} distinct nodes",
                DenseIndex::MAX
            ))
        })?;
        self.ids.push(id);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Register both endpoints (origin first) and append the edge.
    pub(crate) fn push_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let f = self.intern(from)?;
        let t = self.intern(to)?;
        self.edges.push((f, t));
        Ok(())
    }

    /// Counting-sort the edge list into CSR and compute the degree index.
    pub(crate) fn finish(self) -> Graph {
        let n = self.ids.len();

        let mut offsets = vec![0usize; n + 1];
        for &(from, _) in &self.edges {
            offsets[from as usize + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        // Stable: edges are scattered in input order, so each origin keeps file order.
        let mut cursors = offsets[..n].to_vec();
        let mut targets = vec![0 as DenseIndex; self.edges.len()];
        for (from, to) in self.edges {
            let slot = &mut cursors[from as usize];
            targets[*slot] = to;
            *slot += 1;
        }

        let degrees = DegreeIndex::compute(&offsets);

        Graph {
            ids: self.ids,
            index: self.index,
            offsets,
            targets,
            degrees,
        }
    }
}
