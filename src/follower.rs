//! Walks an agent along the waypoints of a [`Path`].
use bevy::math::Vec3;
use bevy::prelude::Component;

use crate::path::Path;

/// Moves an agent through a list of waypoints at a fixed speed.
///
/// Movement happens on the XZ plane, the agent keeps its own height. No steering or smoothing is applied.
#[derive(Debug, Clone, Component, PartialEq)]
pub struct PathFollower {
    waypoints: Vec<Vec3>,
    cursor: usize,
    /// World units per second.
    pub speed: f32,
    /// Distance at which a waypoint counts as reached.
    pub arrival_tolerance: f32,
}

impl PathFollower {
    pub fn new(waypoints: Vec<Vec3>, speed: f32, arrival_tolerance: f32) -> Self {
        PathFollower {
            waypoints,
            cursor: 0,
            speed,
            arrival_tolerance,
        }
    }

    pub fn from_path(path: &Path, speed: f32, arrival_tolerance: f32) -> Self {
        Self::new(path.waypoints(), speed, arrival_tolerance)
    }

    /// True while there are waypoints left to reach.
    pub fn is_active(&self) -> bool {
        self.cursor < self.waypoints.len()
    }

    /// The waypoint currently being walked toward.
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.cursor).copied()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Waypoints not reached yet, the current one included.
    pub fn remaining(&self) -> &[Vec3] {
        self.waypoints.get(self.cursor..).unwrap_or(&[])
    }

    /// Drops the active path.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = 0;
    }

    /// Advances `position` toward the current waypoint for `delta` seconds and returns the new position.
    ///
    /// Never overshoots a waypoint. Reaching the last waypoint clears the path.
    pub fn step(&mut self, position: Vec3, delta: f32) -> Vec3 {
        let Some(waypoint) = self.current() else {
            return position;
        };

        let target = Vec3::new(waypoint.x, position.y, waypoint.z);
        let to_target = target - position;
        let distance = to_target.length();
        let travel = (self.speed * delta).max(0.0);

        let next = if distance <= travel {
            target
        } else {
            position + to_target / distance * travel
        };

        if next.distance(target) <= self.arrival_tolerance {
            self.cursor += 1;
            if self.cursor >= self.waypoints.len() {
                self.clear();
            }
        }

        next
    }
}
