//! Entry point for grid searches, validating inputs before running A*.
use bevy::{log, math::UVec2};
use ndarray::ArrayView2;

use crate::{
    astar::astar_grid,
    cell::Cell,
    error::{PathfindingError, Result},
    neighbor::Neighborhood,
    path::Path,
};

const SIZE_HINT: usize = 1024;

/// AStar pathfinding
///
/// # Arguments
/// * `neighborhood` - The [`Neighborhood`] to use for the pathfinding.
/// * `grid` - The [`ArrayView2`] of [`Cell`]s to search.
/// * `start` - The starting position.
/// * `goal` - The goal position.
/// * `budget` - Optional cap on expanded cells.
#[inline(always)]
pub(crate) fn pathfind_astar<N: Neighborhood>(
    neighborhood: &N,
    grid: &ArrayView2<Cell>,
    start: UVec2,
    goal: UVec2,
    budget: Option<usize>,
) -> Result<Path> {
    // Ensure the start and goal are within bounds of the grid
    let shape = grid.shape();
    if start.x as usize >= shape[0] || start.y as usize >= shape[1] {
        log::warn!("Start is out of bounds: {:?}", start);
        return Err(PathfindingError::OutOfBounds(start));
    }

    if goal.x as usize >= shape[0] || goal.y as usize >= shape[1] {
        log::warn!("Goal is out of bounds: {:?}", goal);
        return Err(PathfindingError::OutOfBounds(goal));
    }

    // An unwalkable goal can never be reached, skip the search entirely.
    // The start is allowed to be unwalkable since the agent is already standing there.
    if !grid[[goal.x as usize, goal.y as usize]].is_walkable() {
        log::debug!("Goal {:?} is not walkable", goal);
        return Err(PathfindingError::NoPathFound);
    }

    let result = timed!("A* search", {
        astar_grid(neighborhood, grid, start, goal, SIZE_HINT, budget)
    });

    if let Err(error) = &result {
        log::debug!("Search from {:?} to {:?} failed: {}", start, goal, error);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbor::CardinalNeighborhood;
    use bevy::math::Vec3;
    use ndarray::Array2;

    fn cells(width: usize, height: usize) -> Array2<Cell> {
        Array2::from_shape_fn((width, height), |(x, y)| {
            Cell::new(UVec2::new(x as u32, y as u32), Vec3::ZERO, true)
        })
    }

    #[test]
    fn test_goal_out_of_bounds() {
        let grid = cells(4, 4);
        let result = pathfind_astar(
            &CardinalNeighborhood,
            &grid.view(),
            UVec2::new(0, 0),
            UVec2::new(0, 4),
            None,
        );
        assert_eq!(result, Err(PathfindingError::OutOfBounds(UVec2::new(0, 4))));
    }

    #[test]
    fn test_start_out_of_bounds() {
        let grid = cells(4, 4);
        let result = pathfind_astar(
            &CardinalNeighborhood,
            &grid.view(),
            UVec2::new(4, 0),
            UVec2::new(0, 0),
            None,
        );
        assert_eq!(result, Err(PathfindingError::OutOfBounds(UVec2::new(4, 0))));
    }

    #[test]
    fn test_unwalkable_goal_short_circuits() {
        let mut grid = cells(4, 4);
        grid[[3, 3]].walkable = false;

        // A zero budget would time out if the search actually ran.
        let result = pathfind_astar(
            &CardinalNeighborhood,
            &grid.view(),
            UVec2::new(0, 0),
            UVec2::new(3, 3),
            Some(0),
        );
        assert_eq!(result, Err(PathfindingError::NoPathFound));
    }

    #[test]
    fn test_unwalkable_start_still_searches() {
        let mut grid = cells(4, 1);
        grid[[0, 0]].walkable = false;

        let path = pathfind_astar(
            &CardinalNeighborhood,
            &grid.view(),
            UVec2::new(0, 0),
            UVec2::new(3, 0),
            None,
        )
        .unwrap();
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = cells(4, 4);
        let path = pathfind_astar(
            &CardinalNeighborhood,
            &grid.view(),
            UVec2::new(2, 1),
            UVec2::new(2, 1),
            Some(0),
        )
        .unwrap();
        assert_eq!(path.cells(), vec![UVec2::new(2, 1)]);
    }
}
