//! Error types for the analysis core.
//!
//! Only the hard-fail surfaces return these (model building, the
//! layered-architecture precondition). Soft-fail analyzers report
//! failure inside their result objects instead; see each module's
//! contract.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JReverseError {
    /// Input snapshot violates a loader invariant.
    #[error("Malformed program model: {0}")]
    MalformedModel(String),

    /// Analysis failure that could not be downgraded.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dependency-graph construction or traversal failure.
    #[error("Graph error: {0}")]
    Graph(String),

    /// Invalid analyzer configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, JReverseError>;

impl JReverseError {
    pub fn malformed_model(msg: impl Into<String>) -> Self {
        JReverseError::MalformedModel(msg.into())
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        JReverseError::Analysis(msg.into())
    }

    pub fn graph(msg: impl Into<String>) -> Self {
        JReverseError::Graph(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        JReverseError::Config(msg.into())
    }
}
