//! neuronet-core: sparse in-memory graph engine.
//!
//! Streams a directed edge list from text, stores it as compressed sparse
//! rows keyed by dense indices, and answers degree, neighbor, bounded BFS and
//! induced-subgraph queries. Memory grows with the number of distinct nodes
//! and edges, never with the magnitude of node ids.
//!
//! [`Engine`] owns the current graph and replaces it wholesale on each load.
//! The free functions in [`traversal`] work on any [`Graph`] directly.

mod config;
mod degree;
mod engine;
mod error;
mod graph;
mod ingest;
mod stats;
pub mod traversal;

pub use config::{
    EngineConfig, DEFAULT_MAX_MEMORY_MB, ENV_COMMENT_PREFIXES, ENV_MAX_MEMORY_MB,
    MAX_MAX_MEMORY_MB, MIN_MAX_MEMORY_MB,
};
pub use degree::DegreeIndex;
pub use engine::{Engine, EngineStatus, LoadReport};
pub use error::{GraphError, Result};
pub use graph::{Edge, Graph, NodeId};
pub use ingest::{read_graph, read_graph_file, READER_SOURCE};
pub use stats::{estimate_bytes, Summary};
pub use traversal::{
    bfs, bfs_neighborhood, extract_subgraph, induced_edges, NeighborResult, SubgraphResult,
    TraversalResult,
};
