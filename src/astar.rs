//! A* search over a grid of [`Cell`]s.
use bevy::math::UVec2;
use indexmap::map::Entry::{Occupied, Vacant};
use ndarray::ArrayView2;
use std::collections::BinaryHeap;

use crate::{
    cell::Cell,
    error::PathfindingError,
    neighbor::{Neighborhood, Neighbors},
    path::Path,
    FxIndexMap, SmallestCostHolder,
};

/// Search bookkeeping for one discovered cell. Lives only for the duration of a single search.
#[derive(Debug, Clone, Copy)]
struct Visit {
    parent: usize,
    cost: u32,
    closed: bool,
}

/// A* search algorithm for a grid of [`Cell`]s.
///
/// The grid is only read, so any number of searches can run over the same grid at once.
///
/// # Arguments
/// * `neighborhood` - Reference to the [`Neighborhood`] to use.
/// * `grid` - A view of the 2D cell array.
/// * `start` - The starting position in the grid. It is searched from even if unwalkable.
/// * `goal` - The goal position in the grid.
/// * `size_hint` - A hint for the size of the binary heap.
/// * `budget` - Maximum number of cells to expand before giving up.
///
/// # Returns
/// * [`Path`] from `start` to `goal` inclusive, [`PathfindingError::NoPathFound`] when the open set runs dry,
///   or [`PathfindingError::Timeout`] when the budget is spent.
pub(crate) fn astar_grid<N: Neighborhood>(
    neighborhood: &N,
    grid: &ArrayView2<Cell>,
    start: UVec2,
    goal: UVec2,
    size_hint: usize,
    budget: Option<usize>,
) -> Result<Path, PathfindingError> {
    let start_h = neighborhood.heuristic(start, goal);

    let mut to_visit = BinaryHeap::with_capacity(size_hint / 2);
    to_visit.push(SmallestCostHolder {
        estimated_cost: start_h,
        heuristic: start_h,
        cost: 0,
        index: 0,
    });

    let mut visited: FxIndexMap<UVec2, Visit> = FxIndexMap::default();
    visited.insert(
        start,
        Visit {
            parent: usize::MAX,
            cost: 0,
            closed: false,
        },
    );

    let mut expanded = 0;
    let mut neighbors = Neighbors::new();

    while let Some(SmallestCostHolder { cost, index, .. }) = to_visit.pop() {
        let current_pos = {
            let Some((pos, visit)) = visited.get_index_mut(index) else {
                continue;
            };

            // Stale heap entry, a cheaper route to this cell was already taken.
            if visit.closed || cost > visit.cost {
                continue;
            }

            visit.closed = true;
            *pos
        };

        if current_pos == goal {
            return Ok(reconstruct(grid, &visited, index, cost));
        }

        if let Some(budget) = budget {
            if expanded >= budget {
                return Err(PathfindingError::Timeout { budget });
            }
        }
        expanded += 1;

        neighbors.clear();
        neighborhood.neighbors(grid, current_pos, &mut neighbors);

        for &(neighbor, dir) in neighbors.iter() {
            if !grid[[neighbor.x as usize, neighbor.y as usize]].is_walkable() {
                continue;
            }

            let new_cost = cost + neighborhood.step_cost(dir);
            let h;
            let n;
            match visited.entry(neighbor) {
                Vacant(e) => {
                    h = neighborhood.heuristic(neighbor, goal);
                    n = e.index();
                    e.insert(Visit {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
                Occupied(mut e) => {
                    if e.get().closed || e.get().cost <= new_cost {
                        continue;
                    }
                    h = neighborhood.heuristic(neighbor, goal);
                    n = e.index();
                    e.insert(Visit {
                        parent: index,
                        cost: new_cost,
                        closed: false,
                    });
                }
            }

            to_visit.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                heuristic: h,
                cost: new_cost,
                index: n,
            });
        }
    }

    Err(PathfindingError::NoPathFound)
}

// Walks parent links back from `index` to the start and returns the path in start to goal order.
fn reconstruct(
    grid: &ArrayView2<Cell>,
    visited: &FxIndexMap<UVec2, Visit>,
    index: usize,
    cost: u32,
) -> Path {
    let mut current = index;
    let mut steps = vec![];

    while let Some((pos, visit)) = visited.get_index(current) {
        steps.push(*pos);
        current = visit.parent;
    }

    steps.reverse();

    let waypoints = steps
        .iter()
        .map(|pos| grid[[pos.x as usize, pos.y as usize]].position())
        .collect();

    Path::new(steps, waypoints, cost)
}
