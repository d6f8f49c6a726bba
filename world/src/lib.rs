#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the hedge maze.
//!
//! The world stands in for the host scene: it owns every spawned entity, the
//! player avatar, the published score and the goal flag. All mutation flows
//! through [`apply`]; everything else is read through [`query`].

use std::collections::BTreeMap;

use hedge_maze_core::{
    Command, EntityId, EntityKind, Event, Footprint, ScoreState, SpawnPose, WorldPosition,
    WELCOME_BANNER,
};
use tracing::{debug, info, warn};

/// Represents the authoritative hedge maze world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    entities: BTreeMap<EntityId, Entity>,
    next_entity: u32,
    player: Option<Player>,
    goal: Option<WorldPosition>,
    goal_reached: bool,
    score: Option<ScoreState>,
    tick_index: u64,
}

impl World {
    /// Creates an empty world awaiting spawn commands.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            entities: BTreeMap::new(),
            next_entity: 0,
            player: None,
            goal: None,
            goal_reached: false,
            score: None,
            tick_index: 0,
        }
    }

    fn allocate_entity(&mut self) -> Option<EntityId> {
        let id = EntityId::new(self.next_entity);
        self.next_entity = self.next_entity.checked_add(1)?;
        Some(id)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug)]
struct Entity {
    kind: EntityKind,
    position: WorldPosition,
    footprint: Footprint,
}

#[derive(Clone, Copy, Debug)]
struct Player {
    pose: SpawnPose,
    position: WorldPosition,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SpawnEntity {
            kind,
            position,
            footprint,
        } => {
            if kind == EntityKind::Goal && world.goal.is_some() {
                warn!(?position, "ignoring second goal marker");
                return;
            }

            let Some(entity) = world.allocate_entity() else {
                warn!(?kind, ?position, "entity identifiers exhausted, refusing spawn");
                return;
            };
            let _ = world.entities.insert(
                entity,
                Entity {
                    kind,
                    position,
                    footprint,
                },
            );
            if kind == EntityKind::Goal {
                world.goal = Some(position);
            }
            debug!(entity = entity.get(), ?kind, x = position.x(), z = position.z(), "spawned entity");
            out_events.push(Event::EntitySpawned {
                entity,
                kind,
                position,
            });
        }
        Command::PlacePlayer { pose } => {
            world.player = Some(Player {
                pose,
                position: pose.position,
            });
            out_events.push(Event::PlayerPlaced { pose });
        }
        Command::MovePlayer { position } => {
            if !position.is_finite() {
                warn!(?position, "discarding non-finite player position");
                return;
            }
            let Some(player) = world.player.as_mut() else {
                warn!("player moved before being placed");
                return;
            };

            let from = player.position;
            if from == position {
                return;
            }
            player.position = position;
            out_events.push(Event::PlayerMoved { from, to: position });
        }
        Command::PickUpCollectible { entity } => {
            let is_collectible = world
                .entities
                .get(&entity)
                .is_some_and(|candidate| candidate.kind == EntityKind::Collectible);
            if !is_collectible {
                debug!(entity = entity.get(), "pickup ignored for unknown collectible");
                return;
            }

            let _ = world.entities.remove(&entity);
            out_events.push(Event::CollectiblePicked { entity });
        }
        Command::ReachGoal => {
            if world.goal_reached {
                return;
            }
            let Some(position) = world.goal else {
                warn!("goal reached before a goal marker was spawned");
                return;
            };

            world.goal_reached = true;
            info!("player reached the end of the maze");
            out_events.push(Event::GoalReached { position });
        }
        Command::PublishScore { score } => {
            if world.score == Some(score) {
                return;
            }
            world.score = Some(score);
            out_events.push(Event::ScoreChanged { score });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use hedge_maze_core::{EntityId, EntityKind, Footprint, ScoreState, SpawnPose, WorldPosition};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only view of every live entity.
    #[must_use]
    pub fn entities(world: &World) -> EntityView {
        let snapshots = world
            .entities
            .iter()
            .map(|(id, entity)| EntitySnapshot {
                id: *id,
                kind: entity.kind,
                position: entity.position,
                footprint: entity.footprint,
            })
            .collect();
        EntityView { snapshots }
    }

    /// Looks up a single live entity.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<EntitySnapshot> {
        world.entities.get(&id).map(|entity| EntitySnapshot {
            id,
            kind: entity.kind,
            position: entity.position,
            footprint: entity.footprint,
        })
    }

    /// Counts the live entities of the provided kind.
    #[must_use]
    pub fn entity_count(world: &World, kind: EntityKind) -> usize {
        world
            .entities
            .values()
            .filter(|entity| entity.kind == kind)
            .count()
    }

    /// Pose the avatar was placed with, if it has been placed.
    #[must_use]
    pub fn player_pose(world: &World) -> Option<SpawnPose> {
        world.player.map(|player| player.pose)
    }

    /// Current avatar position, if it has been placed.
    #[must_use]
    pub fn player_position(world: &World) -> Option<WorldPosition> {
        world.player.map(|player| player.position)
    }

    /// Anchor of the goal marker, if it has been spawned.
    #[must_use]
    pub fn goal_position(world: &World) -> Option<WorldPosition> {
        world.goal
    }

    /// Reports whether the goal has been reached during this session.
    #[must_use]
    pub fn goal_reached(world: &World) -> bool {
        world.goal_reached
    }

    /// Most recently published score, if any.
    #[must_use]
    pub fn score(world: &World) -> Option<ScoreState> {
        world.score
    }

    /// Read-only snapshot describing all live entities in identifier order.
    #[derive(Clone, Debug, Default)]
    pub struct EntityView {
        snapshots: Vec<EntitySnapshot>,
    }

    impl EntityView {
        /// Iterator over the captured entity snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
            self.snapshots.iter()
        }

        /// Number of captured snapshots.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view holds no entities.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single entity used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EntitySnapshot {
        /// Identifier allocated by the world.
        pub id: EntityId,
        /// Role of the entity within the maze.
        pub kind: EntityKind,
        /// Anchor of the entity on the floor plane.
        pub position: WorldPosition,
        /// Collision volume attached to the entity.
        pub footprint: Footprint,
    }
}
