// Error taxonomy for the analytics core.
//
// Two kinds of failure come out of the pure analytics modules. Configuration
// errors mean the caller asked for something that can never work and should
// fix its inputs. Insufficient-data errors mean the inputs were valid but too
// thin for the computation; callers can skip that step and keep going.
//
// Loading and the CLI use anyhow on top of this.

use thiserror::Error;

/// Errors raised by the keyword, sentiment, and topic components.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// The caller supplied an invalid option or keyword list.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The inputs were well-formed but too small to compute a result.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl AnalyticsError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn insufficient(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    /// Whether a caller can drop the failing step and continue the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

/// Convenience result type for the analytics core.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_insufficient_data_is_recoverable() {
        assert!(AnalyticsError::insufficient("2 documents").is_recoverable());
        assert!(!AnalyticsError::config("topic_count must be positive").is_recoverable());
    }

    #[test]
    fn display_names_the_category() {
        let err = AnalyticsError::config("empty keyword");
        assert_eq!(err.to_string(), "Configuration error: empty keyword");
    }
}
