//! Streaming edge-list reader.
//!
//! One directed edge per line, two unsigned integers separated by
//! whitespace, `,` or `;`. Blank lines and comment lines are skipped.
//! The file is read exactly once, front to back.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, GraphBuilder, NodeId};
use crate::stats;

/// Label used in errors when the input has no path.
pub const READER_SOURCE: &str = "<reader>";

/// How often (in edges) the running memory estimate is checked.
const MEMORY_CHECK_INTERVAL: usize = 1 << 16;

const PROGRESS_INTERVAL: usize = 1 << 20;

/// Open `path` and build a graph from it.
pub fn read_graph_file(path: &Path, config: &EngineConfig) -> Result<Graph> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    read_edges(BufReader::new(file), config, path)
}

/// Build a graph from any buffered reader.
pub fn read_graph<R: BufRead>(reader: R, config: &EngineConfig) -> Result<Graph> {
    read_edges(reader, config, Path::new(READER_SOURCE))
}

fn read_edges<R: BufRead>(mut reader: R, config: &EngineConfig, source: &Path) -> Result<Graph> {
    let mut builder = GraphBuilder::default();
    let mut buf = Vec::with_capacity(64);
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| GraphError::io(source, e))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        let line = std::str::from_utf8(&buf)
            .map_err(|_| GraphError::format(line_no, "line is not valid UTF-8"))?;

        let parsed = parse_line(line, config).map_err(|r| GraphError::format(line_no, r))?;
        let Some((from, to)) = parsed else {
            continue;
        };
        builder.push_edge(from, to)?;

        let edges = builder.edge_count();
        if edges % MEMORY_CHECK_INTERVAL == 0 {
            check_memory(builder.node_count(), edges, config)?;
        }
        if edges % PROGRESS_INTERVAL == 0 {
            debug!(edges, nodes = builder.node_count(), line = line_no, "ingest progress");
        }
    }

    check_memory(builder.node_count(), builder.edge_count(), config)?;
    Ok(builder.finish())
}

fn check_memory(node_count: usize, edge_count: usize, config: &EngineConfig) -> Result<()> {
    let estimated = stats::estimate_bytes(node_count, edge_count);
    if estimated > config.max_memory_mb.saturating_mul(1024 * 1024) {
        return Err(GraphError::MemoryLimit {
            estimated_mb: stats::bytes_to_mb(estimated).max(1),
            max_mb: config.max_memory_mb,
        });
    }
    Ok(())
}

/// `Ok(None)` for lines that carry no edge.
fn parse_line(
    line: &str,
    config: &EngineConfig,
) -> std::result::Result<Option<(NodeId, NodeId)>, String> {
    let line = line.trim();
    if line.is_empty() || config.is_comment(line) {
        return Ok(None);
    }

    let mut tokens = line
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty());

    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(from), Some(to), None) => Ok(Some((parse_id(from)?, parse_id(to)?))),
        (Some(_), Some(_), Some(_)) => {
            Err(format!("expected 2 tokens, found {}", 3 + tokens.count()))
        }
        (first, _, _) => Err(format!(
            "expected 2 tokens, found {}",
            usize::from(first.is_some())
        )),
    }
}

fn parse_id(token: &str) -> std::result::Result<NodeId, String> {
    token
        .parse::<NodeId>()
        .map_err(|_| format!("'{token}' is not a non-negative integer node id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Graph> {
        read_graph(Cursor::new(text.as_bytes()), &EngineConfig::default())
    }

    fn format_line(err: GraphError) -> usize {
        match err {
            GraphError::Format { line, .. } => line,
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_dataset() {
        let g = read("0 1\n0 2\n1 3\n2 3\n3 4\n").unwrap();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_comments_blank_lines_and_crlf() {
        let g = read("# FromNodeId\tToNodeId\r\n\r\n% mm\n  \n0\t1\r\n1 2\n").unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(0).unwrap(), vec![1]);
    }

    #[test]
    fn test_delimiters() {
        let g = read("0,1\n1;2\n2 ,\t3\n").unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(2).unwrap(), vec![3]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let g = read("0 1\n1 2").unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let g = read("").unwrap();
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_too_few_tokens() {
        assert_eq!(format_line(read("0 1\n5\n").unwrap_err()), 2);
    }

    #[test]
    fn test_too_many_tokens() {
        let err = read("0 1 2\n").unwrap_err();
        assert!(err.to_string().contains("found 3"));
        assert_eq!(format_line(err), 1);
    }

    #[test]
    fn test_non_integer() {
        assert_eq!(format_line(read("0 1\n\n0 x\n").unwrap_err()), 3);
    }

    #[test]
    fn test_negative_id_rejected() {
        assert_eq!(format_line(read("-1 2\n").unwrap_err()), 1);
    }

    #[test]
    fn test_overflowing_id_rejected() {
        assert!(read("18446744073709551616 1\n").is_err());
        assert!(read("18446744073709551615 1\n").is_ok());
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes: &[u8] = b"0 1\n\xff\xfe 2\n";
        let err = read_graph(Cursor::new(bytes), &EngineConfig::default()).unwrap_err();
        assert_eq!(format_line(err), 2);
    }

    #[test]
    fn test_custom_comment_prefix() {
        let config = EngineConfig {
            comment_prefixes: vec!['!'],
            ..EngineConfig::default()
        };
        let g = read_graph(Cursor::new("! note\n0 1\n"), &config).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(read_graph(Cursor::new("# note\n0 1\n"), &config).is_err());
    }

    #[test]
    fn test_memory_limit() {
        let config = EngineConfig::default().with_max_memory_mb(0);
        let err = read_graph(Cursor::new("0 1\n"), &config).unwrap_err();
        assert!(matches!(err, GraphError::MemoryLimit { max_mb: 0, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_graph_file(Path::new("/nonexistent/missing.txt"), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
