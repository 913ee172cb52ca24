//! This module defines the `Path` component returned by path queries.
use bevy::math::{UVec2, Vec3};
use bevy::prelude::Component;
use std::collections::VecDeque;

/// The result of a successful search: ordered cells from start to goal,
/// their world space centers and the total movement cost.
///
/// If using [`crate::plugin::WayfinderPlugin`] this is inserted as a component on the agent
/// alongside a [`crate::follower::PathFollower`].
#[derive(Debug, Clone, Component)]
pub struct Path {
    pub(crate) path: VecDeque<UVec2>,
    pub(crate) waypoints: VecDeque<Vec3>,
    cost: u32,
}

impl Path {
    /// Create a new path from grid positions and their matching world positions.
    /// # Arguments
    /// * `path` - Grid positions from start to goal
    /// * `waypoints` - World positions, one per grid position
    /// * `cost` - The total movement cost of the path
    ///
    pub fn new(path: Vec<UVec2>, waypoints: Vec<Vec3>, cost: u32) -> Self {
        debug_assert_eq!(path.len(), waypoints.len());

        Path {
            path: path.into(),
            waypoints: waypoints.into(),
            cost,
        }
    }

    /// Returns true if the path contains the given position
    pub fn is_position_in_path(&self, pos: UVec2) -> bool {
        self.path.contains(&pos)
    }

    /// Grid positions in order, the first being the start.
    pub fn cells(&self) -> Vec<UVec2> {
        self.path.iter().copied().collect()
    }

    /// World space waypoints in order, suitable for a mover.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bevy::math::{UVec2, Vec3};
    /// use bevy_wayfinder::prelude::*;
    ///
    /// let path = Path::new(
    ///     vec![UVec2::new(0, 0), UVec2::new(1, 0)],
    ///     vec![Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 0.0, 0.5)],
    ///     1,
    /// );
    /// assert_eq!(path.waypoints(), vec![Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 0.0, 0.5)]);
    /// ```
    pub fn waypoints(&self) -> Vec<Vec3> {
        self.waypoints.iter().copied().collect()
    }

    /// Returns the movement cost of the path
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Number of cells in the path, start and goal included.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Number of moves needed to walk the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Returns true if the path is empty
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Pops the first position of the path.
    pub fn pop(&mut self) -> Option<UVec2> {
        self.waypoints.pop_front();
        self.path.pop_front()
    }

    /// Returns the next position in the path without removing it.
    pub fn next(&self) -> Option<UVec2> {
        self.path.front().cloned()
    }

    pub fn goal(&self) -> Option<UVec2> {
        self.path.back().cloned()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Path {}

impl IntoIterator for Path {
    type Item = UVec2;
    type IntoIter = std::collections::vec_deque::IntoIter<UVec2>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Path {
        Path::new(
            vec![UVec2::new(0, 0), UVec2::new(1, 0), UVec2::new(1, 1)],
            vec![
                Vec3::new(0.5, 0.0, 0.5),
                Vec3::new(1.5, 0.0, 0.5),
                Vec3::new(1.5, 0.0, 1.5),
            ],
            2,
        )
    }

    #[test]
    fn test_path_accessors() {
        let path = sample();
        assert_eq!(path.len(), 3);
        assert_eq!(path.steps(), 2);
        assert_eq!(path.cost(), 2);
        assert_eq!(path.next(), Some(UVec2::new(0, 0)));
        assert_eq!(path.goal(), Some(UVec2::new(1, 1)));
        assert!(path.is_position_in_path(UVec2::new(1, 0)));
        assert!(!path.is_position_in_path(UVec2::new(0, 1)));
    }

    #[test]
    fn test_pop_keeps_waypoints_aligned() {
        let mut path = sample();
        assert_eq!(path.pop(), Some(UVec2::new(0, 0)));
        assert_eq!(path.cells(), vec![UVec2::new(1, 0), UVec2::new(1, 1)]);
        assert_eq!(path.waypoints()[0], Vec3::new(1.5, 0.0, 0.5));
        assert_eq!(path.waypoints().len(), path.len());
    }

    #[test]
    fn test_into_iter() {
        let cells: Vec<UVec2> = sample().into_iter().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[2], UVec2::new(1, 1));
    }
}
