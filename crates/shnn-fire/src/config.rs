//! Device configuration

use crate::error::{FireError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable overriding the worker count
pub const THREADS_ENV: &str = "SHNN_FIRE_THREADS";

/// Configuration of a [`CpuDevice`](crate::CpuDevice)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FireConfig {
    /// Number of worker threads (None = one per logical CPU)
    pub num_threads: Option<usize>,
    /// Prefix for worker thread names
    pub thread_name_prefix: String,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "shnn-fire".to_string(),
        }
    }
}

impl FireConfig {
    /// Create a configuration with a fixed worker count
    pub fn new(num_threads: usize) -> Result<Self> {
        if num_threads == 0 {
            return Err(FireError::invalid_parameter(
                "num_threads",
                num_threads.to_string(),
                "> 0",
            ));
        }

        Ok(Self {
            num_threads: Some(num_threads),
            ..Default::default()
        })
    }

    /// Default configuration, with the worker count taken from
    /// `SHNN_FIRE_THREADS` when it is set
    pub fn from_env() -> Result<Self> {
        match std::env::var(THREADS_ENV) {
            Ok(raw) => Self::from_env_value(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn from_env_value(raw: &str) -> Result<Self> {
        let threads = raw.trim().parse::<usize>().map_err(|_| {
            FireError::invalid_parameter(THREADS_ENV, raw, "a positive integer")
        })?;
        Self::new(threads)
    }

    /// Set the worker count
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Set the worker thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_threads {
            Self::new(n)?;
        }
        if self.thread_name_prefix.is_empty() {
            return Err(FireError::invalid_config("thread name prefix must not be empty"));
        }
        Ok(())
    }
}
