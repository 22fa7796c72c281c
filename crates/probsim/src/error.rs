//! Error types for simulation runs and estimate reduction.

/// Errors surfaced by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A count-like parameter was zero.
    ///
    /// Raised before any trial executes.
    #[error("invalid configuration: {parameter} must be positive")]
    InvalidParameter { parameter: &'static str },

    /// A reducer was asked to divide by a zero denominator.
    #[error("undefined {estimate}: {reason}")]
    UndefinedEstimate {
        estimate: &'static str,
        reason: &'static str,
    },

    /// The worker pool for a parallel run could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl SimError {
    /// Rejects a zero value for the named parameter.
    pub(crate) fn require_positive(parameter: &'static str, value: u64) -> Result<u64, Self> {
        if value == 0 {
            Err(Self::InvalidParameter { parameter })
        } else {
            Ok(value)
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for SimError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err.to_string())
    }
}
