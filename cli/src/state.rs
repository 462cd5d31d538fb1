use std::path::Path;
use std::sync::Arc;

use neuronet_core::{Engine, EngineConfig, LoadReport, Result};
use parking_lot::RwLock;

/// The current graph, shared between whoever drives the engine.
///
/// Loads take the write lock for their whole duration, so no query can see a
/// graph mid-replacement. Queries share the read lock.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Engine::new(config))),
        }
    }

    /// Run `f` against the engine under the read lock.
    pub fn with_engine<R, F: FnOnce(&Engine) -> R>(&self, f: F) -> R {
        f(&self.inner.read())
    }

    /// Replace the current graph. The previous one stays if this fails.
    pub fn load(&self, path: &Path) -> Result<LoadReport> {
        self.inner.write().load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread;

    #[test]
    fn test_load_then_query_across_threads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"0 1\n0 2\n1 3\n2 3\n3 4\n").unwrap();

        let shared = SharedEngine::new(EngineConfig::default());
        shared.load(file.path()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.with_engine(|e| e.bfs(0, 2).unwrap()))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_failed_load_keeps_graph() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1 2\n").unwrap();

        let shared = SharedEngine::new(EngineConfig::default());
        shared.load(file.path()).unwrap();
        assert!(shared.load(Path::new("/nonexistent/graph.txt")).is_err());
        assert_eq!(shared.with_engine(|e| e.node_count().unwrap()), 2);
    }
}
