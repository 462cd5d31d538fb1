use serde::Deserialize;

use crate::error::{GraphError, Result};

pub const DEFAULT_MAX_MEMORY_MB: usize = 4096;
pub const MIN_MAX_MEMORY_MB: usize = 64;
pub const MAX_MAX_MEMORY_MB: usize = 131_072; // 128 GB

pub const ENV_MAX_MEMORY_MB: &str = "NEURONET_MAX_MEMORY_MB";
pub const ENV_COMMENT_PREFIXES: &str = "NEURONET_COMMENT_PREFIXES";

/// Engine settings applied to every load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Loads whose memory estimate exceeds this cap are rejected.
    pub max_memory_mb: usize,
    /// A line whose first non-blank character is one of these is skipped.
    pub comment_prefixes: Vec<char>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_memory_mb: DEFAULT_MAX_MEMORY_MB,
            comment_prefixes: vec!['#', '%'],
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with `NEURONET_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_MEMORY_MB) {
            config.max_memory_mb = raw.trim().parse().map_err(|_| {
                GraphError::InvalidArgument(format!(
                    "{ENV_MAX_MEMORY_MB} must be an integer, got '{raw}'"
                ))
            })?;
        }
        if let Some(raw) = lookup(ENV_COMMENT_PREFIXES) {
            config.comment_prefixes = raw.chars().filter(|c| !c.is_whitespace()).collect();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_max_memory_mb(mut self, mb: usize) -> Self {
        self.max_memory_mb = mb;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_MAX_MEMORY_MB..=MAX_MAX_MEMORY_MB).contains(&self.max_memory_mb) {
            return Err(GraphError::InvalidArgument(format!(
                "max_memory_mb must be in {MIN_MAX_MEMORY_MB}..={MAX_MAX_MEMORY_MB}, got {}",
                self.max_memory_mb
            )));
        }
        if let Some(c) = self.comment_prefixes.iter().find(|c| {
            c.is_ascii_digit() || c.is_whitespace() || matches!(**c, ',' | ';' | '-' | '+')
        }) {
            return Err(GraphError::InvalidArgument(format!(
                "'{c}' cannot be used as a comment prefix"
            )));
        }
        Ok(())
    }

    pub(crate) fn is_comment(&self, line: &str) -> bool {
        line.chars()
            .next()
            .is_some_and(|c| self.comment_prefixes.contains(&c))
    }
}
