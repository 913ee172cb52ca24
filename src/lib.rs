use std::cmp::Ordering;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

#[macro_use]
mod macros;

mod astar;
pub mod bounds;
pub mod cell;
pub mod dir;
pub mod error;
pub mod follower;
pub mod grid;
pub mod heuristic;
pub mod neighbor;
pub mod path;
mod pathfind;
pub mod plugin;

pub mod prelude {
    pub use crate::bounds::{BoundsProvider, GridBounds};
    pub use crate::cell::Cell;
    pub use crate::dir::Dir;
    pub use crate::error::{GridError, PathfindingError};
    pub use crate::follower::PathFollower;
    pub use crate::grid::{Grid, GridSettings, GridSettingsBuilder, NoObstacles, ObstacleQuery};
    pub use crate::neighbor::*;
    pub use crate::path::Path;
    pub use crate::plugin::{Goal, WayfinderPlugin, WayfinderSet, WayfinderSettings};
}

/// Movement cost type used by the search.
pub type MovementCost = u32;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Open set entry. The heap pops the lowest `estimated_cost` (f) first,
/// then the lowest `heuristic` (h), then the earliest discovered cell.
pub(crate) struct SmallestCostHolder<Id> {
    estimated_cost: Id,
    heuristic: Id,
    cost: Id,
    index: usize,
}

impl<Id: PartialEq> PartialEq for SmallestCostHolder<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.heuristic.eq(&other.heuristic)
            && self.index == other.index
    }
}

impl<Id: Eq> Eq for SmallestCostHolder<Id> {}

impl<Id: Ord> PartialOrd for SmallestCostHolder<Id> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Id: Ord> Ord for SmallestCostHolder<Id> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.index.cmp(&self.index))
    }
}
