//! This module contains the `Grid` resource which is the main type for the crate.
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use bevy::{
    log::{debug, info},
    math::{UVec2, Vec2, Vec3},
    prelude::Resource,
};
use ndarray::{Array2, ArrayView2};

use crate::{
    bounds::{BoundsProvider, GridBounds},
    cell::Cell,
    error::{GridError, PathfindingError, Result},
    neighbor::{Neighborhood, Neighbors},
    path::Path,
    pathfind::pathfind_astar,
};

/// Answers whether a world position is blocked, typically backed by the host's physics scene.
///
/// Called once per cell when the grid is built or rescanned, possibly from several threads.
pub trait ObstacleQuery: Sync {
    /// Is anything solid within `radius` of `position`?
    fn is_obstacle(&self, position: Vec3, radius: f32) -> bool;
}

impl<F> ObstacleQuery for F
where
    F: Fn(Vec3, f32) -> bool + Sync,
{
    fn is_obstacle(&self, position: Vec3, radius: f32) -> bool {
        self(position, radius)
    }
}

/// Obstacle query for a region with nothing in it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl ObstacleQuery for NoObstacles {
    fn is_obstacle(&self, _position: Vec3, _radius: f32) -> bool {
        false
    }
}

/// Holder for internal crate settings.
#[derive(Clone, Debug)]
pub struct GridSettings(pub(crate) GridInternalSettings);

/// Builder for `GridSettings`.
///
/// Example usage:
/// ```
/// use bevy::math::{Vec2, Vec3};
/// use bevy_wayfinder::prelude::*;
///
/// let grid_settings = GridSettingsBuilder::new(Vec3::ZERO, Vec2::new(32.0, 32.0), 1.0)
///     .search_budget(4096)
///     .build();
///
/// let grid: Grid<CardinalNeighborhood> =
///     Grid::new(&grid_settings, &|_: Vec3, _: f32| false).unwrap();
/// assert_eq!(grid.width(), 32);
/// ```
///
#[derive(Clone, Debug)]
pub struct GridSettingsBuilder {
    origin: Vec3,
    size: Vec2,
    cell_size: f32,
    obstacle_radius: Option<f32>,
    search_budget: Option<usize>,
}

impl Default for GridSettingsBuilder {
    fn default() -> Self {
        GridSettingsBuilder {
            origin: Vec3::ZERO,
            size: Vec2::new(64.0, 64.0),
            cell_size: 1.0,
            obstacle_radius: None,
            search_budget: None,
        }
    }
}

impl GridSettingsBuilder {
    /// Cover a `size.x` by `size.y` region of the XZ plane centered on `origin`
    /// with square cells `cell_size` wide.
    pub fn new(origin: Vec3, size: Vec2, cell_size: f32) -> Self {
        GridSettingsBuilder {
            origin,
            size,
            cell_size,
            ..Default::default()
        }
    }

    /// Cover the footprint of `bounds`. The grid plane sits at the bottom of the box.
    pub fn from_bounds(bounds: GridBounds, cell_size: f32) -> Self {
        let center = bounds.center();
        Self::new(
            Vec3::new(center.x, bounds.min.y, center.z),
            bounds.footprint(),
            cell_size,
        )
    }

    /// Cover whatever a [`BoundsProvider`] reports, failing if it has nothing to offer.
    pub fn from_provider<P: BoundsProvider + ?Sized>(
        provider: &P,
        cell_size: f32,
    ) -> std::result::Result<Self, GridError> {
        provider
            .bounds()
            .map(|bounds| Self::from_bounds(bounds, cell_size))
            .ok_or(GridError::MissingBounds)
    }

    /// Width of each square cell in world units.
    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Number of cells per world unit, the inverse of [`GridSettingsBuilder::cell_size()`].
    pub fn cell_density(mut self, density: f32) -> Self {
        self.cell_size = 1.0 / density;
        self
    }

    /// Radius handed to the [`ObstacleQuery`] for every cell. Defaults to half the cell size.
    pub fn obstacle_radius(mut self, radius: f32) -> Self {
        self.obstacle_radius = Some(radius);
        self
    }

    /// Maximum number of cells a single search may expand before it gives up with
    /// [`PathfindingError::Timeout`]. Unlimited by default.
    pub fn search_budget(mut self, budget: usize) -> Self {
        self.search_budget = Some(budget);
        self
    }

    /// Builds the [`GridSettings`] from the current builder state.
    /// Validation happens in [`Grid::new()`].
    pub fn build(self) -> GridSettings {
        GridSettings(GridInternalSettings {
            origin: self.origin,
            size: self.size,
            cell_size: self.cell_size,
            obstacle_radius: self.obstacle_radius,
            search_budget: self.search_budget,
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct GridInternalSettings {
    pub(crate) origin: Vec3,
    pub(crate) size: Vec2,
    pub(crate) cell_size: f32,
    pub(crate) obstacle_radius: Option<f32>,
    pub(crate) search_budget: Option<usize>,
}

impl Default for GridInternalSettings {
    fn default() -> Self {
        GridSettingsBuilder::default().build().0
    }
}

/// `Grid` is the main `Resource` for the crate.
///
/// It owns a `width x height` array of [`Cell`]s laid over the XZ plane and maps world positions onto them.
/// Grid `x` follows world X and grid `y` follows world Z.
///
/// Searches only borrow the grid immutably and keep their bookkeeping to themselves,
/// so a `Grid` can be shared between threads and cloned as a snapshot before a rescan.
///
/// # Example
/// ```rust
/// use bevy::math::{UVec2, Vec2, Vec3};
/// use bevy_wayfinder::prelude::*;
///
/// let settings = GridSettingsBuilder::new(Vec3::new(2.5, 0.0, 2.5), Vec2::new(5.0, 5.0), 1.0).build();
///
/// // A wall along x = 2 with a gap at the far end.
/// let wall = |p: Vec3, _radius: f32| p.x > 2.0 && p.x < 3.0 && p.z < 4.0;
/// let grid: Grid<CardinalNeighborhood> = Grid::new(&settings, &wall).unwrap();
///
/// let path = grid.find_path(Vec3::new(0.5, 0.0, 0.5), Vec3::new(4.5, 0.0, 0.5)).unwrap();
/// assert!(path.is_position_in_path(UVec2::new(2, 4)));
/// ```
#[derive(Resource, Clone, Debug)]
pub struct Grid<N: Neighborhood> {
    pub(crate) neighborhood: N,

    origin: Vec3,
    bottom_left: Vec3,
    cell_size: f32,
    obstacle_radius: f32,
    search_budget: Option<usize>,
    dimensions: UVec2,

    grid: Array2<Cell>,
}

impl<N: Neighborhood> Grid<N> {
    /// Creates a new [`Grid`] from [`GridSettings`] and marks every cell through `obstacles`.
    ///
    /// Fails with [`GridError::InvalidDimension`] if the region rounds to zero cells on either axis.
    pub fn new<Q: ObstacleQuery + ?Sized>(
        settings: &GridSettings,
        obstacles: &Q,
    ) -> std::result::Result<Self, GridError> {
        let GridInternalSettings {
            origin,
            size,
            cell_size,
            obstacle_radius,
            search_budget,
        } = settings.0;

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }

        let size_x = (size.x / cell_size).round();
        let size_y = (size.y / cell_size).round();

        let valid = |n: f32| n.is_finite() && n >= 1.0 && n <= u32::MAX as f32;
        if !valid(size_x) || !valid(size_y) {
            return Err(GridError::InvalidDimension {
                size_x: size_x as i64,
                size_y: size_y as i64,
            });
        }

        let dimensions = UVec2::new(size_x as u32, size_y as u32);
        let bottom_left = origin - Vec3::new(size.x * 0.5, 0.0, size.y * 0.5);

        let grid = Array2::from_shape_fn(
            (dimensions.x as usize, dimensions.y as usize),
            |(x, y)| {
                let coords = UVec2::new(x as u32, y as u32);
                Cell::new(coords, cell_center(bottom_left, cell_size, coords), true)
            },
        );

        let mut grid = Self {
            neighborhood: N::default(),
            origin,
            bottom_left,
            cell_size,
            obstacle_radius: obstacle_radius.unwrap_or(cell_size * 0.5),
            search_budget,
            dimensions,
            grid,
        };

        let start = std::time::Instant::now();
        grid.reset_walkability(obstacles);
        info!(
            "Built {}x{} grid in {:?}",
            dimensions.x,
            dimensions.y,
            start.elapsed()
        );

        Ok(grid)
    }

    /// Returns the neighborhood used by this grid.
    pub fn neighborhood(&self) -> &N {
        &self.neighborhood
    }

    /// Returns an [`ndarray::ArrayView2<Cell>`] for read-only access to the grid data.
    pub fn view(&self) -> ArrayView2<Cell> {
        self.grid.view()
    }

    /// Returns the dimensions of the grid in cells.
    pub fn dimensions(&self) -> UVec2 {
        self.dimensions
    }

    /// Returns the width of the grid.
    pub fn width(&self) -> u32 {
        self.dimensions.x
    }

    /// Returns the height of the grid.
    pub fn height(&self) -> u32 {
        self.dimensions.y
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Half the cell size. A sensible arrival tolerance for movers.
    pub fn cell_radius(&self) -> f32 {
        self.cell_size * 0.5
    }

    /// Center of the covered region.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Corner of cell `(0, 0)` furthest from the rest of the grid.
    pub fn bottom_left(&self) -> Vec3 {
        self.bottom_left
    }

    pub fn search_budget(&self) -> Option<usize> {
        self.search_budget
    }

    pub fn set_search_budget(&mut self, budget: Option<usize>) {
        self.search_budget = budget;
    }

    /// Checks if a position is within the bounds of the grid.
    pub fn in_bounds(&self, pos: UVec2) -> bool {
        pos.x < self.dimensions.x && pos.y < self.dimensions.y
    }

    /// Gets the [`Cell`] at a grid position.
    pub fn cell(&self, pos: UVec2) -> Option<&Cell> {
        self.grid.get([pos.x as usize, pos.y as usize])
    }

    /// Iterates every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    /// Test if a grid cell is walkable. Out of bounds positions are not.
    pub fn is_walkable(&self, pos: UVec2) -> bool {
        self.cell(pos).is_some_and(Cell::is_walkable)
    }

    /// Overrides the walkability of a single cell.
    pub fn set_walkable(&mut self, pos: UVec2, walkable: bool) -> Result<()> {
        let cell = self
            .grid
            .get_mut([pos.x as usize, pos.y as usize])
            .ok_or(PathfindingError::OutOfBounds(pos))?;
        cell.walkable = walkable;
        Ok(())
    }

    /// World space center of the cell at `pos`.
    pub fn cell_to_world(&self, pos: UVec2) -> Option<Vec3> {
        self.cell(pos).map(Cell::position)
    }

    /// Maps a world position onto the grid.
    ///
    /// The position is normalized against the grid extents and clamped, so points outside the region
    /// resolve to the nearest edge cell. Only non finite positions fail.
    pub fn world_to_grid(&self, world: Vec3) -> Result<UVec2> {
        if self.grid.is_empty() || !world.is_finite() {
            return Err(PathfindingError::NotFound(world));
        }

        let extents = self.dimensions.as_vec2() * self.cell_size;
        let local = Vec2::new(world.x - self.bottom_left.x, world.z - self.bottom_left.z);
        let percent = (local / extents).clamp(Vec2::ZERO, Vec2::ONE);

        let x = ((percent.x * self.dimensions.x as f32).floor() as u32).min(self.dimensions.x - 1);
        let y = ((percent.y * self.dimensions.y as f32).floor() as u32).min(self.dimensions.y - 1);
        let pos = UVec2::new(x, y);

        if !self.in_bounds(pos) {
            return Err(PathfindingError::NotFound(world));
        }

        Ok(pos)
    }

    /// Gets the [`Cell`] containing a world position. See [`Grid::world_to_grid()`].
    pub fn world_to_cell(&self, world: Vec3) -> Result<&Cell> {
        let pos = self.world_to_grid(world)?;
        self.cell(pos).ok_or(PathfindingError::NotFound(world))
    }

    /// Re-evaluates every cell against `obstacles` in place.
    /// Cell coordinates and positions are untouched, only walkability changes.
    pub fn reset_walkability<Q: ObstacleQuery + ?Sized>(&mut self, obstacles: &Q) {
        let radius = self.obstacle_radius;
        let scan = |cell: &mut Cell| {
            cell.walkable = !obstacles.is_obstacle(cell.position(), radius);
        };

        timed!("Scanned obstacles", {
            #[cfg(feature = "parallel")]
            self.grid.par_map_inplace(scan);

            #[cfg(not(feature = "parallel"))]
            self.grid.map_inplace(scan);
        });

        debug!(
            "{} of {} cells walkable",
            self.grid.iter().filter(|cell| cell.is_walkable()).count(),
            self.grid.len()
        );
    }

    /// A copy of this grid rescanned against `obstacles`, leaving `self` untouched for searches in flight.
    pub fn rescanned<Q: ObstacleQuery + ?Sized>(&self, obstacles: &Q) -> Self {
        let mut snapshot = self.clone();
        snapshot.reset_walkability(obstacles);
        snapshot
    }

    /// In bounds neighbors of `pos` in the neighborhood's fixed direction order, walkable or not.
    pub fn neighbors(&self, pos: UVec2) -> Vec<UVec2> {
        let mut neighbors = Neighbors::new();
        if self.in_bounds(pos) {
            self.neighborhood
                .neighbors(&self.grid.view(), pos, &mut neighbors);
        }
        neighbors.into_iter().map(|(pos, _)| pos).collect()
    }

    /// Heuristic cost estimate between two grid positions.
    pub fn estimate(&self, a: UVec2, b: UVec2) -> u32 {
        self.neighborhood.heuristic(a, b)
    }

    /// Generate an A* path between two world positions.
    ///
    /// Both positions are mapped with [`Grid::world_to_grid()`] before searching.
    /// The returned [`Path`] includes the start cell.
    pub fn find_path(&self, start: Vec3, target: Vec3) -> Result<Path> {
        let start = self.world_to_grid(start)?;
        let goal = self.world_to_grid(target)?;
        self.pathfind(start, goal)
    }

    /// Generate an A* path from `start` to `goal`.
    ///
    /// # Returns
    /// A [`Path`] from `start` to `goal` inclusive, or the reason none was produced.
    /// An unwalkable goal is rejected without searching, an unwalkable start is searched from.
    pub fn pathfind(&self, start: UVec2, goal: UVec2) -> Result<Path> {
        pathfind_astar(
            &self.neighborhood,
            &self.grid.view(),
            start,
            goal,
            self.search_budget,
        )
    }

    /// Runs several independent searches over this grid. Results are in query order.
    pub fn pathfind_many(&self, queries: &[(UVec2, UVec2)]) -> Vec<Result<Path>> {
        #[cfg(feature = "parallel")]
        let results = queries
            .par_iter()
            .map(|&(start, goal)| self.pathfind(start, goal))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results = queries
            .iter()
            .map(|&(start, goal)| self.pathfind(start, goal))
            .collect();

        results
    }

    /// Checks if a path exists from `start` to `goal`.
    pub fn is_path_viable(&self, start: UVec2, goal: UVec2) -> bool {
        self.pathfind(start, goal).is_ok()
    }
}

fn cell_center(bottom_left: Vec3, cell_size: f32, coords: UVec2) -> Vec3 {
    bottom_left
        + Vec3::new(
            (coords.x as f32 + 0.5) * cell_size,
            0.0,
            (coords.y as f32 + 0.5) * cell_size,
        )
}
