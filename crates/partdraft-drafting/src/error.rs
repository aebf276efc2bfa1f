//! Error types for drawing generation.

use thiserror::Error;

/// Errors that abort drawing generation.
///
/// Only input-validation failures live here; degenerate geometry is
/// recovered locally and reported through
/// [`Diagnostics`](crate::Diagnostics).
#[derive(Error, Debug)]
pub enum DraftError {
    /// The provided mesh failed structural validation.
    #[error(transparent)]
    Mesh(#[from] partdraft_mesh::MeshError),

    /// The part recipe failed validation.
    #[error(transparent)]
    Recipe(#[from] partdraft_ir::RecipeError),

    /// No views were requested.
    #[error("view set is empty")]
    EmptyViewSet,

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for drafting operations.
pub type Result<T> = std::result::Result<T, DraftError>;
