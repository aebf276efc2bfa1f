//! Error types for recipe loading and validation.

use thiserror::Error;

use crate::NodeId;

/// Errors raised while loading or validating a part recipe.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// A node references an id that is not in the graph.
    #[error("node {0} is referenced but not defined")]
    MissingNode(NodeId),

    /// The operation graph contains a cycle.
    #[error("cycle detected at node {0}")]
    Cycle(NodeId),

    /// A primitive has an out-of-range parameter.
    #[error("invalid parameter on node {id}: {what}")]
    InvalidParam {
        /// The offending node.
        id: NodeId,
        /// Description of the violation.
        what: String,
    },

    /// The recipe JSON could not be parsed.
    #[error("malformed recipe: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for recipe operations.
pub type Result<T> = std::result::Result<T, RecipeError>;
