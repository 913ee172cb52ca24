//! Bevy plugin that turns a [`Goal`] on an agent into a [`Path`] and walks the agent along it.
use bevy::{log, prelude::*};

use crate::{follower::PathFollower, grid::Grid, neighbor::Neighborhood, path::Path};

/// Adds the pathfinding and path following systems for a [`Grid<N>`] resource.
///
/// Insert a [`Grid<N>`] resource, then give any entity with a [`Transform`] a [`Goal`].
/// The plugin searches from the entity's translation to the goal, inserts the resulting [`Path`]
/// and a [`PathFollower`], and moves the entity every frame until it arrives.
#[derive(Default)]
pub struct WayfinderPlugin<N: Neighborhood> {
    _neighborhood: std::marker::PhantomData<N>,
}

/// Movement settings used by the plugin systems.
#[derive(Resource, Debug, Clone)]
pub struct WayfinderSettings {
    /// World units per second.
    pub move_speed: f32,
    /// Distance at which a waypoint counts as reached. Defaults to the grid's cell radius.
    pub arrival_tolerance: Option<f32>,
}

impl Default for WayfinderSettings {
    fn default() -> Self {
        WayfinderSettings {
            move_speed: 5.0,
            arrival_tolerance: None,
        }
    }
}

/// World position an agent wants to reach. Changing it triggers a new search.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Goal(pub Vec3);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WayfinderSet;

impl<N: Neighborhood> Plugin for WayfinderPlugin<N> {
    fn build(&self, app: &mut App) {
        app.init_resource::<WayfinderSettings>().add_systems(
            Update,
            (pathfind::<N>, follow_path)
                .chain()
                .in_set(WayfinderSet),
        );
    }
}

fn pathfind<N: Neighborhood>(
    grid: Option<Res<Grid<N>>>,
    settings: Res<WayfinderSettings>,
    mut commands: Commands,
    query: Query<(Entity, &Transform, &Goal), Changed<Goal>>,
    mut warned: Local<bool>,
) {
    let Some(grid) = grid else {
        if !*warned && !query.is_empty() {
            log::warn!("No Grid resource has been inserted, goals will be ignored");
            *warned = true;
        }
        return;
    };

    let tolerance = settings
        .arrival_tolerance
        .unwrap_or_else(|| grid.cell_radius());

    for (entity, transform, goal) in query.iter() {
        log::debug!("Pathfinding for entity: {:?}", entity);

        match grid.find_path(transform.translation, goal.0) {
            Ok(path) => {
                let follower = PathFollower::from_path(&path, settings.move_speed, tolerance);
                commands.entity(entity).insert((path, follower));
            }
            Err(error) => {
                log::debug!("No path for entity {:?}: {}", entity, error);
                commands
                    .entity(entity)
                    .remove::<(Goal, Path, PathFollower)>();
            }
        }
    }
}

fn follow_path(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Transform, &mut PathFollower)>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut follower) in query.iter_mut() {
        transform.translation = follower.step(transform.translation, delta);

        if !follower.is_active() {
            log::debug!("Entity {:?} reached its goal", entity);
            commands
                .entity(entity)
                .remove::<(Goal, Path, PathFollower)>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridSettingsBuilder, NoObstacles};
    use crate::neighbor::CardinalNeighborhood;
    use bevy::math::Vec2;
    use std::time::Duration;

    fn world(x: u32, y: u32) -> Vec3 {
        Vec3::new(x as f32 + 0.5, 0.0, y as f32 + 0.5)
    }

    fn app_with_grid(grid: Option<Grid<CardinalNeighborhood>>) -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(WayfinderSettings {
                move_speed: 1.0,
                arrival_tolerance: Some(0.01),
            })
            .add_plugins(WayfinderPlugin::<CardinalNeighborhood>::default());

        if let Some(grid) = grid {
            app.insert_resource(grid);
        }

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(500));

        app
    }

    fn grid_5x5() -> Grid<CardinalNeighborhood> {
        let settings =
            GridSettingsBuilder::new(Vec3::new(2.5, 0.0, 2.5), Vec2::new(5.0, 5.0), 1.0).build();
        Grid::new(&settings, &NoObstacles).unwrap()
    }

    #[test]
    fn test_goal_inserts_path() {
        let mut app = app_with_grid(Some(grid_5x5()));
        let agent = app
            .world_mut()
            .spawn((Transform::from_translation(world(0, 0)), Goal(world(2, 0))))
            .id();

        app.update();

        let path = app.world().get::<Path>(agent).unwrap();
        assert_eq!(path.len(), 3);
        assert!(app.world().get::<PathFollower>(agent).is_some());
    }

    #[test]
    fn test_agent_walks_to_goal() {
        let mut app = app_with_grid(Some(grid_5x5()));
        let agent = app
            .world_mut()
            .spawn((Transform::from_translation(world(0, 0)), Goal(world(2, 0))))
            .id();

        for _ in 0..6 {
            app.update();
        }

        let transform = app.world().get::<Transform>(agent).unwrap();
        assert_eq!(transform.translation, world(2, 0));
        assert!(app.world().get::<PathFollower>(agent).is_none());
        assert!(app.world().get::<Goal>(agent).is_none());
    }

    #[test]
    fn test_unreachable_goal_is_dropped() {
        let mut grid = grid_5x5();
        grid.set_walkable(UVec2::new(4, 4), false).unwrap();

        let mut app = app_with_grid(Some(grid));
        let agent = app
            .world_mut()
            .spawn((Transform::from_translation(world(0, 0)), Goal(world(4, 4))))
            .id();

        app.update();

        assert!(app.world().get::<Goal>(agent).is_none());
        assert!(app.world().get::<Path>(agent).is_none());
        assert_eq!(
            app.world().get::<Transform>(agent).unwrap().translation,
            world(0, 0)
        );
    }

    #[test]
    fn test_missing_grid_is_ignored() {
        let mut app = app_with_grid(None);
        let agent = app
            .world_mut()
            .spawn((Transform::from_translation(world(0, 0)), Goal(world(2, 0))))
            .id();

        app.update();

        assert!(app.world().get::<Goal>(agent).is_some());
        assert!(app.world().get::<PathFollower>(agent).is_none());
    }
}
