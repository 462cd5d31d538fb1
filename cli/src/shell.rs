//! Line-oriented session over a shared engine.
//!
//! Mirrors the interactive workflow: load a dataset, inspect statistics,
//! run a BFS and pull the induced edges of the last result.

use std::io::{self, BufRead, Write};
use std::path::Path;

use neuronet_core::{GraphError, NodeId};
use tracing::debug;

use crate::output::Output;
use crate::state::SharedEngine;

const HELP: &str = "\
commands:
  load <path>              replace the current graph
  summary                  graph statistics
  status                   what is loaded
  degree <node>            out-degree
  neighbors <node>         outgoing neighbors in file order
  max                      node with the highest out-degree
  bfs <start> <depth>      breadth-first search
  edges [node ...]         induced edges of the given nodes, or of the last bfs
  help                     this text
  quit                     leave";

pub struct Shell<W: Write> {
    engine: SharedEngine,
    out: Output<W>,
    last_bfs: Option<Vec<NodeId>>,
}

impl<W: Write> Shell<W> {
    pub fn new(engine: SharedEngine, out: Output<W>) -> Self {
        Self {
            engine,
            out,
            last_bfs: None,
        }
    }

    /// Read commands until EOF or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> io::Result<()> {
        if prompt {
            self.out.prompt()?;
        }
        for line in input.lines() {
            let line = line?;
            match self.execute(line.trim()) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => self.out.error(&e)?,
            }
            if prompt {
                self.out.prompt()?;
            }
        }
        Ok(())
    }

    /// Returns `Ok(true)` when the session should end.
    fn execute(&mut self, line: &str) -> Result<bool, CommandError> {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return Ok(false);
        };
        let args: Vec<&str> = words.collect();
        debug!(command = cmd, args = args.len(), "shell command");

        match cmd {
            "quit" | "exit" => return Ok(true),
            "help" => self.out.text(HELP)?,
            "load" => {
                let [path] = args.as_slice() else {
                    return Err(CommandError::Usage("load <path>"));
                };
                let report = self.engine.load(Path::new(path))?;
                self.last_bfs = None;
                self.out.load_report(&report)?;
            }
            "summary" => {
                let summary = self.engine.with_engine(|e| e.summary())?;
                self.out.summary(&summary)?;
            }
            "status" => {
                let status = self.engine.with_engine(|e| e.status());
                self.out.status(&status)?;
            }
            "degree" => {
                let node = one_node(&args, "degree <node>")?;
                let degree = self.engine.with_engine(|e| e.degree(node))?;
                self.out.degree(node, degree)?;
            }
            "neighbors" => {
                let node = one_node(&args, "neighbors <node>")?;
                let neighbors = self.engine.with_engine(|e| e.neighbors(node))?;
                self.out.neighbors(node, &neighbors)?;
            }
            "max" => {
                let (node, degree) = self.engine.with_engine(|e| e.max_degree_node())?;
                self.out.degree(node, degree)?;
            }
            "bfs" => {
                let [start, depth] = args.as_slice() else {
                    return Err(CommandError::Usage("bfs <start> <depth>"));
                };
                let start = parse_node(start)?;
                let depth: u32 = depth
                    .parse()
                    .map_err(|_| CommandError::Usage("bfs <start> <depth>"))?;
                let nodes = self.engine.with_engine(|e| e.bfs(start, depth))?;
                self.out.bfs(start, depth, &nodes, None)?;
                self.last_bfs = Some(nodes);
            }
            "edges" => {
                let nodes = if args.is_empty() {
                    self.last_bfs.clone().ok_or(CommandError::NoBfsResult)?
                } else {
                    args.iter()
                        .map(|a| parse_node(a))
                        .collect::<Result<Vec<_>, _>>()?
                };
                let edges = self.engine.with_engine(|e| e.induced_edges(&nodes))?;
                self.out.edges(&edges)?;
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        }
        Ok(false)
    }
}

fn one_node(args: &[&str], usage: &'static str) -> Result<NodeId, CommandError> {
    match args {
        [node] => parse_node(node),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_node(s: &str) -> Result<NodeId, CommandError> {
    s.parse().map_err(|_| CommandError::BadNode(s.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Engine(#[from] GraphError),
    #[error(transparent)]
    Output(#[from] io::Error),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a node id")]
    BadNode(String),
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("no bfs result yet, run 'bfs <start> <depth>' first")]
    NoBfsResult,
}
