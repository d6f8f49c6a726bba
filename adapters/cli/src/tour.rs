//! Scripted avatar that walks a headless session from waypoint to waypoint.
//!
//! The tour moves in straight lines and ignores hedges; it exists to exercise
//! the pickup and goal logic without a physics host.

use std::collections::VecDeque;

use glam::Vec2;
use hedge_maze_core::{EntityId, EntityKind, WorldPosition};
use hedge_maze_world::{query, World};

/// Avatar walking a fixed list of waypoints at constant speed.
#[derive(Debug)]
pub(crate) struct Tour {
    position: Vec2,
    waypoints: VecDeque<Vec2>,
    speed: f32,
}

impl Tour {
    pub(crate) fn new(
        start: WorldPosition,
        waypoints: impl IntoIterator<Item = WorldPosition>,
        speed: f32,
    ) -> Self {
        Self {
            position: to_plane(start),
            waypoints: waypoints.into_iter().map(to_plane).collect(),
            speed,
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Advances towards the next waypoint, returning the new position.
    pub(crate) fn step(&mut self) -> Option<WorldPosition> {
        let target = *self.waypoints.front()?;
        let offset = target - self.position;
        if offset.length() <= self.speed {
            self.position = target;
            let _ = self.waypoints.pop_front();
        } else {
            self.position += offset.normalize_or_zero() * self.speed;
        }
        Some(WorldPosition::new(self.position.x, self.position.y))
    }
}

/// Collectibles whose trigger volume overlaps `position`.
pub(crate) fn touched_collectibles(world: &World, position: WorldPosition) -> Vec<EntityId> {
    query::entities(world)
        .iter()
        .filter(|entity| entity.kind == EntityKind::Collectible)
        .filter(|entity| entity.position.distance_to(position) <= entity.footprint.width / 2.0)
        .map(|entity| entity.id)
        .collect()
}

fn to_plane(position: WorldPosition) -> Vec2 {
    Vec2::new(position.x(), position.z())
}
