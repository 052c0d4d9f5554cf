//! Pool configuration
//!
//! Configuration is plain data with builder-style setters. It is validated
//! once, when [`ObjectPool::with_config`](crate::pool::ObjectPool::with_config)
//! builds a pool.

use crate::error::{RecycleError, RecycleResult};

/// Configuration for object pools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Human-readable pool name, used in logs
    pub name: String,

    /// Number of objects constructed eagerly when the pool is built
    pub pre_warm: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            name: String::from("pool"),
            pre_warm: 0,
        }
    }
}

impl PoolConfig {
    /// Upper bound for [`PoolConfig::pre_warm`]
    pub const MAX_PRE_WARM: usize = 1 << 16;

    /// Create a configuration with the given pool name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Production preset: warm a small batch so the first requests skip
    /// construction
    pub fn production(name: impl Into<String>) -> Self {
        Self::new(name).with_pre_warm(32)
    }

    /// Debug preset: nothing pre-warmed, every miss is visible in stats
    pub fn debug(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Set pool name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set number of pre-warmed objects
    pub fn with_pre_warm(mut self, pre_warm: usize) -> Self {
        self.pre_warm = pre_warm;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> RecycleResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecycleError::invalid_config("pool name must not be empty"));
        }

        if self.pre_warm > Self::MAX_PRE_WARM {
            return Err(RecycleError::invalid_config(format!(
                "pre_warm {} exceeds maximum {}",
                self.pre_warm,
                Self::MAX_PRE_WARM
            )));
        }

        Ok(())
    }
}
