//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree and builder contracts.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found in tree: {0}")]
    NodeNotFound(String),

    #[error("maximum depth {max_depth} exceeded at '{path}'")]
    DepthExceeded { path: String, max_depth: usize },

    #[error("invalid type expression '{input}': {message}")]
    InvalidTypeExpr { input: String, message: String },

    #[error("unknown node handler: {0}")]
    UnknownHandler(String),
}
