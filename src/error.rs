//! Error types for taxonomy loading and resolution.
//!
//! Two layers mirror the two failure classes the engine has: a malformed
//! forest definition is fatal at load time, while a lookup miss is an
//! expected outcome that callers map to a 404 page or an empty selector.

use thiserror::Error;

/// Load-time failures. The taxonomy is required for the product-authoring
/// flow to function at all, so these refuse startup rather than degrade.
#[derive(Debug, Error)]
pub enum ForestError {
    /// The definition contained no root categories.
    #[error("forest definition is empty")]
    EmptyForest,

    /// Two nodes anywhere in the forest share an id. Ids must be globally
    /// unique; display names are only unique among siblings.
    #[error("duplicate node id in forest: {id}")]
    DuplicateId { id: String },

    /// A branch exceeded the depth ceiling, which only happens with a
    /// degenerate definition.
    #[error("forest branch exceeds maximum depth {max} at node {id}")]
    DepthExceeded { id: String, max: usize },

    /// The external definition file could not be read.
    #[error("failed to read taxonomy definition {path}: {source}")]
    DefinitionRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The external definition file could not be parsed.
    #[error("failed to parse taxonomy definition {path}: {source}")]
    DefinitionParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Lookup failures. `NotFound` is a normal, expected outcome (stale URL,
/// product record with a retired category) and is never escalated as a
/// system error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No node in the forest matched the given identifier or flat value.
    #[error("category not found: {0}")]
    NotFound(String),

    /// A selection referenced an id that is not a valid choice at the
    /// requested level.
    #[error("invalid selection at level {level}: {id}")]
    InvalidSelection { level: usize, id: String },
}

/// Configuration and CLI-surface failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Forest(#[from] ForestError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
