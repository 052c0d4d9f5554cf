//! Standalone error types for nebula-recycle
//!
//! Pools, lists and tracked sets never fail at runtime. The only fallible
//! surface is configuration, which is validated once when a pool is built.

use thiserror::Error;
use tracing::warn;

/// Recycling layer errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecycleError {
    #[error("Invalid pool configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl RecycleError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "RECYCLE:CONFIG:INVALID",
        }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(%reason, "rejected pool configuration");

        Self::InvalidConfig { reason }
    }
}

/// Result type for recycling operations
pub type RecycleResult<T> = Result<T, RecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let error = RecycleError::invalid_config("name must not be empty");
        assert!(error.to_string().contains("name must not be empty"));
        assert_eq!(error.code(), "RECYCLE:CONFIG:INVALID");

        let result: RecycleResult<()> = Err(error.clone());
        assert_eq!(result, Err(error));
    }
}
