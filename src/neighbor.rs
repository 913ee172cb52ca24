//! Movement rules: which cells are adjacent, what a step costs and how distance is estimated.
use bevy::math::UVec2;
use ndarray::ArrayView2;
use smallvec::SmallVec;

use std::fmt::Debug;

use crate::{
    cell::Cell,
    dir::{Dir, EAST, NORTH, NORTHEAST, NORTHWEST, SOUTH, SOUTHEAST, SOUTHWEST, WEST},
    heuristic::{manhattan, octile, DIAGONAL_COST, STRAIGHT_COST},
    MovementCost,
};

/// Adjacent positions collected during expansion, at most eight on a flat grid.
pub type Neighbors = SmallVec<[(UVec2, Dir); 8]>;

pub trait Neighborhood: Clone + Debug + Default + Sync + Send + 'static {
    /// Directions considered, in expansion order.
    fn directions(&self) -> &'static [Dir];

    /// Cost of moving one step in `dir`.
    fn step_cost(&self, dir: Dir) -> MovementCost;

    /// Estimated cost from `pos` to `target`. Must never overestimate.
    fn heuristic(&self, pos: UVec2, target: UVec2) -> MovementCost;

    /// Collects every in-bounds neighbor of `pos` in [`Neighborhood::directions()`] order.
    /// Walkability is not checked here.
    #[inline(always)]
    fn neighbors(&self, grid: &ArrayView2<Cell>, pos: UVec2, target: &mut Neighbors) {
        let shape = grid.shape();
        let x = pos.x as i64;
        let y = pos.y as i64;

        for &dir in self.directions() {
            let (dx, dy) = dir.vector();
            let nx = x + dx as i64;
            let ny = y + dy as i64;

            if nx >= 0 && ny >= 0 && (nx as usize) < shape[0] && (ny as usize) < shape[1] {
                target.push((UVec2::new(nx as u32, ny as u32), dir));
            }
        }
    }

    fn is_ordinal(&self) -> bool {
        false
    }
}

/// 4-way movement, every step costs 1, Manhattan estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardinalNeighborhood;

impl Neighborhood for CardinalNeighborhood {
    #[inline(always)]
    fn directions(&self) -> &'static [Dir] {
        &[NORTH, SOUTH, EAST, WEST]
    }

    #[inline(always)]
    fn step_cost(&self, _dir: Dir) -> MovementCost {
        1
    }

    #[inline(always)]
    fn heuristic(&self, pos: UVec2, target: UVec2) -> MovementCost {
        manhattan(pos, target, 1)
    }
}

/// 8-way movement with classic 10/14 step costs and an octile estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdinalNeighborhood;

impl Neighborhood for OrdinalNeighborhood {
    #[inline(always)]
    fn directions(&self) -> &'static [Dir] {
        &[
            NORTH, SOUTH, EAST, WEST, NORTHEAST, NORTHWEST, SOUTHEAST, SOUTHWEST,
        ]
    }

    #[inline(always)]
    fn step_cost(&self, dir: Dir) -> MovementCost {
        if dir.is_diagonal() {
            DIAGONAL_COST
        } else {
            STRAIGHT_COST
        }
    }

    #[inline(always)]
    fn heuristic(&self, pos: UVec2, target: UVec2) -> MovementCost {
        octile(pos, target, STRAIGHT_COST, DIAGONAL_COST)
    }

    #[inline(always)]
    fn is_ordinal(&self) -> bool {
        true
    }
}
