//! Error types for the staffcore engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Absence of data is not an error here: a missing consultant makes
//! reconcile a no-op and duplicate queries return empty results. Errors are
//! reserved for malformed input, failed required providers, and store faults.

use thiserror::Error;

/// Result type alias for staffcore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the staffcore engine
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed validation before any computation started
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A required external signal provider failed or timed out
    ///
    /// Raised for retrieval and learned-rank failures. The optional LLM
    /// provider never surfaces this from compose; its failure degrades the
    /// result instead.
    #[error("upstream provider '{provider}' unavailable: {reason}")]
    UpstreamUnavailable {
        /// Provider label (e.g. "retrieval", "ltr", "llm")
        provider: String,
        /// Human-readable failure reason
        reason: String,
    },

    /// A signal value fell outside the `[0,1]` contract
    #[error("score out of range for '{signal}': {value}")]
    ScoreOutOfRange {
        /// Signal label
        signal: &'static str,
        /// Offending value
        value: f64,
    },

    /// Signature store operation failed
    #[error("store error: {0}")]
    Store(String),
}

impl Error {
    /// Shorthand for an `UpstreamUnavailable` error
    pub fn upstream(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UpstreamUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}
