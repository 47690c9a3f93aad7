//! Error types for the rating engine
//!
//! Recoverable failures are expressed as [`GlickoError`] and travel through
//! the crate as `anyhow` errors. Misuse of the batch API (no opponents,
//! mismatched score slices) is a programming error and panics instead.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GlickoError {
    #[error("Invalid rating: {reason}")]
    InvalidRating { reason: String },

    #[error("Invalid score {score}: scores must lie within [0, 1]")]
    InvalidScore { score: f64 },

    #[error("Degenerate match: {reason}")]
    DegenerateMatch { reason: String },

    #[error("Volatility did not converge after {iterations} iterations: {reason}")]
    ConvergenceFailed { iterations: usize, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
