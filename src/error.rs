//! Error types returned by grid construction and path queries.
use bevy::math::{UVec2, Vec3};
use thiserror::Error;

/// Problems building a [`crate::grid::Grid`]. A grid is never created in a degenerate state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one cell on each axis, got {size_x}x{size_y}")]
    InvalidDimension { size_x: i64, size_y: i64 },

    #[error("cell size must be a positive finite number, got {0}")]
    InvalidCellSize(f32),

    #[error("no bounds were supplied to cover with a grid")]
    MissingBounds,
}

/// Per query failures. None of these leave the grid in a changed state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathfindingError {
    #[error("world position {0} does not map to a grid cell")]
    NotFound(Vec3),

    #[error("grid position {0} is out of bounds")]
    OutOfBounds(UVec2),

    #[error("no path found")]
    NoPathFound,

    #[error("search exceeded its budget of {budget} expanded cells")]
    Timeout { budget: usize },
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
