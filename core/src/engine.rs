use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{GraphError, Result};
use crate::graph::{Edge, Graph, NodeId};
use crate::ingest;
use crate::stats::{self, Summary};
use crate::traversal::{self, SubgraphResult, TraversalResult};

/// Returned by a successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_estimate_bytes: usize,
    pub load_time_ms: f64,
}

/// What the engine currently holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub loaded: bool,
    pub source: Option<PathBuf>,
    pub load_time_ms: Option<f64>,
    /// Successful loads since the engine was created.
    pub loads: u64,
}

struct LoadedGraph {
    graph: Graph,
    summary: Summary,
    source: PathBuf,
    load_time_ms: f64,
}

/// Owner of the current graph and entry point for every query.
///
/// A load builds a complete new graph and its statistics first and only
/// then replaces the current one, so a failed load leaves the previous graph
/// fully queryable. The engine holds no locks; callers that share it across
/// threads serialize access themselves.
pub struct Engine {
    config: EngineConfig,
    current: Option<LoadedGraph>,
    loads: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            current: None,
            loads: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the current graph with the contents of `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let path = path.as_ref();
        let start = Instant::now();
        let graph = ingest::read_graph_file(path, &self.config).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "load rejected, keeping previous graph")
        })?;
        Ok(self.install(graph, path.to_path_buf(), start))
    }

    /// Replace the current graph with edges read from `reader`.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<LoadReport> {
        let start = Instant::now();
        let graph = ingest::read_graph(reader, &self.config)
            .inspect_err(|e| warn!(error = %e, "load rejected, keeping previous graph"))?;
        Ok(self.install(graph, PathBuf::from(ingest::READER_SOURCE), start))
    }

    /// Swap in a fully built graph. Derived statistics are computed here,
    /// before the swap, and never afterwards.
    fn install(&mut self, graph: Graph, source: PathBuf, start: Instant) -> LoadReport {
        let summary = Summary::of(&graph);
        let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            source = %source.display(),
            nodes = summary.node_count,
            edges = summary.edge_count,
            load_time_ms,
            memory_mb = stats::bytes_to_mb(summary.memory_estimate_bytes),
            "graph loaded"
        );

        let report = LoadReport {
            node_count: summary.node_count,
            edge_count: summary.edge_count,
            memory_estimate_bytes: summary.memory_estimate_bytes,
            load_time_ms,
        };

        self.current = Some(LoadedGraph {
            graph,
            summary,
            source,
            load_time_ms,
        });
        self.loads += 1;
        report
    }

    fn loaded(&self) -> Result<&LoadedGraph> {
        self.current.as_ref().ok_or(GraphError::NoGraphLoaded)
    }

    /// The current graph, for callers that run several queries in a row.
    pub fn graph(&self) -> Result<&Graph> {
        Ok(&self.loaded()?.graph)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn node_count(&self) -> Result<usize> {
        Ok(self.graph()?.node_count())
    }

    pub fn edge_count(&self) -> Result<usize> {
        Ok(self.graph()?.edge_count())
    }

    pub fn memory_estimate_bytes(&self) -> Result<usize> {
        Ok(self.loaded()?.summary.memory_estimate_bytes)
    }

    pub fn has_node(&self, id: NodeId) -> Result<bool> {
        Ok(self.graph()?.has_node(id))
    }

    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.graph()?.degree(id)
    }

    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.graph()?.neighbors(id)
    }

    pub fn max_degree_node(&self) -> Result<(NodeId, usize)> {
        self.graph()?.max_degree_node().ok_or(GraphError::EmptyGraph)
    }

    pub fn bfs(&self, start: NodeId, max_depth: u32) -> Result<Vec<NodeId>> {
        traversal::bfs(self.graph()?, start, max_depth)
    }

    pub fn bfs_neighborhood(&self, start: NodeId, max_depth: u32) -> Result<TraversalResult> {
        traversal::bfs_neighborhood(self.graph()?, start, max_depth)
    }

    pub fn induced_edges(&self, nodes: &[NodeId]) -> Result<Vec<Edge>> {
        traversal::induced_edges(self.graph()?, nodes)
    }

    pub fn extract_subgraph(&self, start: NodeId, max_depth: u32) -> Result<SubgraphResult> {
        traversal::extract_subgraph(self.graph()?, start, max_depth)
    }

    pub fn summary(&self) -> Result<Summary> {
        Ok(self.loaded()?.summary.clone())
    }

    pub fn write_summary<W: Write>(&self, mut out: W) -> Result<()> {
        let summary = &self.loaded()?.summary;
        writeln!(out, "{summary}").map_err(|e| GraphError::io("<output>", e))
    }

    /// Human-readable statistics on stdout.
    pub fn print_summary(&self) -> Result<()> {
        self.write_summary(io::stdout().lock())
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            loaded: self.current.is_some(),
            source: self.current.as_ref().map(|c| c.source.clone()),
            load_time_ms: self.current.as_ref().map(|c| c.load_time_ms),
            loads: self.loads,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
