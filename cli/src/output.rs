use std::fmt::Display;
use std::io::{self, Write};

use neuronet_core::{Edge, EngineStatus, LoadReport, NodeId, Summary};
use serde::Serialize;
use serde_json::json;

/// Renders engine results as plain text or one JSON document per result.
pub struct Output<W: Write> {
    w: W,
    json: bool,
}

impl<W: Write> Output<W> {
    pub fn new(w: W, json: bool) -> Self {
        Self { w, json }
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.w, value)?;
        writeln!(self.w)
    }

    pub fn text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.w, "{text}")
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.w, "neuronet> ")?;
        self.w.flush()
    }

    pub fn error(&mut self, err: &dyn Display) -> io::Result<()> {
        if self.json {
            self.emit(&json!({ "error": err.to_string() }))
        } else {
            writeln!(self.w, "error: {err}")
        }
    }

    pub fn load_report(&mut self, report: &LoadReport) -> io::Result<()> {
        if self.json {
            return self.emit(report);
        }
        writeln!(
            self.w,
            "loaded {} nodes, {} edges in {:.1}ms (~{:.2}MB)",
            report.node_count,
            report.edge_count,
            report.load_time_ms,
            report.memory_estimate_bytes as f64 / 1_048_576.0
        )
    }

    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        if self.json {
            return self.emit(summary);
        }
        writeln!(self.w, "{summary}")
    }

    pub fn status(&mut self, status: &EngineStatus) -> io::Result<()> {
        if self.json {
            return self.emit(status);
        }
        match (&status.source, status.load_time_ms) {
            (Some(source), Some(ms)) => writeln!(
                self.w,
                "loaded from {} in {:.1}ms ({} successful loads)",
                source.display(),
                ms,
                status.loads
            ),
            _ => writeln!(self.w, "not loaded"),
        }
    }

    pub fn degree(&mut self, node: NodeId, degree: usize) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({ "node": node, "degree": degree }));
        }
        writeln!(self.w, "node {node}: degree {degree}")
    }

    pub fn neighbors(&mut self, node: NodeId, neighbors: &[NodeId]) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({ "node": node, "neighbors": neighbors }));
        }
        if neighbors.is_empty() {
            writeln!(self.w, "node {node}: (none)")
        } else {
            writeln!(self.w, "node {node}: {}", join(neighbors))
        }
    }

    pub fn bfs(
        &mut self,
        start: NodeId,
        depth: u32,
        nodes: &[NodeId],
        edges: Option<&[Edge]>,
    ) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({
                "start": start,
                "depth": depth,
                "nodes": nodes,
                "edges": edges,
            }));
        }
        writeln!(
            self.w,
            "bfs from {start} (depth {depth}): {} nodes",
            nodes.len()
        )?;
        writeln!(self.w, "{}", join(nodes))?;
        match edges {
            Some(edges) => self.edges(edges),
            None => Ok(()),
        }
    }

    pub fn edges(&mut self, edges: &[Edge]) -> io::Result<()> {
        if self.json {
            return self.emit(&json!({ "edges": edges }));
        }
        writeln!(self.w, "{} edges", edges.len())?;
        for (from, to) in edges {
            writeln!(self.w, "  {from} -> {to}")?;
        }
        Ok(())
    }
}

fn join(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
