#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the hedge maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to. The maze layout itself is described by a [`Grid`]
//! and projected into world space through a [`GridTransform`].

mod error;
mod grid;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use error::{LevelCell, LevelError};
pub use grid::{CellCode, Grid, GridTransform};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the hedge maze.";

/// Reference 8x8 layout shipped with the game (`1` marks hedges, `0` open ground).
pub const REFERENCE_MAZE: [[u8; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 1],
    [1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 1],
    [1, 1, 1, 1, 0, 1, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by one frame.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Materializes a new entity in the world.
    SpawnEntity {
        /// Role of the entity within the maze.
        kind: EntityKind,
        /// Anchor of the entity on the floor plane.
        position: WorldPosition,
        /// Collision volume attached to the entity.
        footprint: Footprint,
    },
    /// Places the player avatar at its starting pose.
    PlacePlayer {
        /// Pose assigned to the avatar.
        pose: SpawnPose,
    },
    /// Reports the avatar's latest position as sampled from host input.
    MovePlayer {
        /// New position of the avatar on the floor plane.
        position: WorldPosition,
    },
    /// Reports that the player touched a collectible.
    PickUpCollectible {
        /// Entity the player interacted with.
        entity: EntityId,
    },
    /// Marks the goal as reached for the remainder of the session.
    ReachGoal,
    /// Publishes the latest score to presentation collaborators.
    PublishScore {
        /// Score snapshot after the most recent transition.
        score: ScoreState,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an entity was created.
    EntitySpawned {
        /// Identifier allocated to the entity.
        entity: EntityId,
        /// Role of the entity within the maze.
        kind: EntityKind,
        /// Anchor of the entity on the floor plane.
        position: WorldPosition,
    },
    /// Confirms that the avatar was placed at its starting pose.
    PlayerPlaced {
        /// Pose assigned to the avatar.
        pose: SpawnPose,
    },
    /// Confirms that the avatar moved.
    PlayerMoved {
        /// Position before the move.
        from: WorldPosition,
        /// Position after the move.
        to: WorldPosition,
    },
    /// Confirms that a collectible was removed from the world by a pickup.
    CollectiblePicked {
        /// Identifier of the collectible that was picked up.
        entity: EntityId,
    },
    /// Announces that the player reached the goal. Broadcast at most once per session.
    GoalReached {
        /// Anchor of the goal marker.
        position: WorldPosition,
    },
    /// Announces a new score for display.
    ScoreChanged {
        /// Score snapshot after the change.
        score: ScoreState,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Position on the horizontal floor plane expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    x: f32,
    z: f32,
}

impl WorldPosition {
    /// Creates a new floor-plane position.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Coordinate along the world `x` axis.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Coordinate along the world `z` axis.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Euclidean distance to `other` within the floor plane.
    #[must_use]
    pub fn distance_to(self, other: WorldPosition) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Reports whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

/// Unique identifier assigned to an entity by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Roles an entity can play within the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Walkable floor slab underneath the maze.
    Floor,
    /// Hedge block occupying a wall cell.
    Wall,
    /// Pickup scattered through open cells.
    Collectible,
    /// Marker placed on the exit cell.
    Goal,
}

/// How an entity participates in collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Immovable solid volume that blocks the player.
    Static,
    /// Non-blocking volume that only reports overlaps.
    Trigger,
}

/// Collision volume attached to a spawned entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Collision behaviour of the volume.
    pub body: BodyKind,
    /// Extent along the world `x` axis.
    pub width: f32,
    /// Extent along the world `y` axis.
    pub height: f32,
    /// Extent along the world `z` axis.
    pub depth: f32,
    /// Height of the entity origin above the floor.
    pub elevation: f32,
}

/// Starting pose of the player avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPose {
    /// Anchor on the floor plane.
    pub position: WorldPosition,
    /// Height of the viewpoint above the floor.
    pub eye_height: f32,
    /// Yaw in radians around the vertical axis.
    pub facing: f32,
}

/// Score progress within a single session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScoreState {
    score: u32,
    won: bool,
    win_threshold: u32,
}

impl ScoreState {
    /// Creates the initial score for a session that is won at `win_threshold` pickups.
    #[must_use]
    pub const fn new(win_threshold: u32) -> Self {
        Self {
            score: 0,
            won: false,
            win_threshold,
        }
    }

    /// Returns the state after one more collectible was picked up.
    ///
    /// Score saturates instead of wrapping and `won` never reverts.
    #[must_use]
    pub const fn incremented(self) -> Self {
        let score = self.score.saturating_add(1);
        Self {
            score,
            won: self.won || score >= self.win_threshold,
            win_threshold: self.win_threshold,
        }
    }

    /// Number of collectibles picked up so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Reports whether the session has been won.
    #[must_use]
    pub const fn won(&self) -> bool {
        self.won
    }

    /// Score required to win the session.
    #[must_use]
    pub const fn win_threshold(&self) -> u32 {
        self.win_threshold
    }
}
