//! `Cell` is a single walkability sample of the grid.
use bevy::math::{UVec2, Vec3};

/// [`Cell`] represents one square of the discretized region.
///
/// Coordinates and world position are fixed when the grid is built, only walkability changes afterwards.
/// Search bookkeeping is never stored here, see [`crate::astar`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) walkable: bool,
    position: Vec3,
    coords: UVec2,
}

impl Cell {
    pub(crate) fn new(coords: UVec2, position: Vec3, walkable: bool) -> Self {
        Cell {
            walkable,
            position,
            coords,
        }
    }

    /// Can an agent occupy this cell?
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// World space center of the cell.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Grid coordinates of the cell.
    pub fn coords(&self) -> UVec2 {
        self.coords
    }

    pub fn grid_x(&self) -> u32 {
        self.coords.x
    }

    pub fn grid_y(&self) -> u32 {
        self.coords.y
    }
}
