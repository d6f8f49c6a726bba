#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for materializing a placement plan in the world.

use std::f32::consts::PI;

use hedge_maze_core::{
    BodyKind, Command, EntityKind, Footprint, GridTransform, SpawnPose, WorldPosition,
};
use hedge_maze_system_placement::PlacementPlan;
use tracing::debug;

/// Share of a cell edge covered by a hedge, leaving a walkable gap between neighbours.
pub const WALL_MARGIN: f32 = 0.9;
/// Share of a cell edge covered by pickup and goal trigger volumes.
pub const PICKUP_FOOTPRINT: f32 = 0.35;
/// Height of pickups and the goal marker above the floor.
pub const PICKUP_ELEVATION: f32 = 0.5;
/// Height of the player viewpoint above the floor.
pub const EYE_HEIGHT: f32 = 1.7;
/// Initial yaw of the player, turned to look into the maze.
pub const START_FACING: f32 = PI;
/// Thickness of the floor slab.
pub const FLOOR_THICKNESS: f32 = 0.1;

const DEFAULT_WALL_HEIGHT: f32 = 4.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    wall_height: f32,
}

impl Config {
    /// Creates a new configuration using the provided hedge height.
    #[must_use]
    pub const fn new(wall_height: f32) -> Self {
        Self { wall_height }
    }

    /// Height of every hedge block.
    #[must_use]
    pub const fn wall_height(&self) -> f32 {
        self.wall_height
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_WALL_HEIGHT)
    }
}

/// Single entity the host world is asked to create.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRecord {
    /// Role of the entity within the maze.
    pub kind: EntityKind,
    /// Anchor of the entity on the floor plane.
    pub position: WorldPosition,
    /// Collision volume attached to the entity.
    pub footprint: Footprint,
}

impl SpawnRecord {
    fn into_command(self) -> Command {
        Command::SpawnEntity {
            kind: self.kind,
            position: self.position,
            footprint: self.footprint,
        }
    }
}

/// Pure system that translates a placement plan into spawn commands.
///
/// The director keeps no handle to the entities it requests; the world owns
/// them from the moment the commands are applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnDirector {
    config: Config,
}

impl SpawnDirector {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Emits one spawn command per plan entry followed by the player placement.
    pub fn handle(&self, plan: &PlacementPlan, transform: &GridTransform, out: &mut Vec<Command>) {
        let records = self.records(plan, transform);
        debug!(entities = records.len(), "spawning placement plan");
        out.extend(records.into_iter().map(SpawnRecord::into_command));
        out.push(Command::PlacePlayer {
            pose: self.spawn_pose(plan, transform),
        });
    }

    /// Lists the entities that [`SpawnDirector::handle`] requests, in emission order.
    ///
    /// The floor comes first, then hedges, the goal marker and collectibles.
    #[must_use]
    pub fn records(&self, plan: &PlacementPlan, transform: &GridTransform) -> Vec<SpawnRecord> {
        let cell_size = transform.cell_size();
        let mut records = Vec::with_capacity(
            2 + plan.wall_cells().len() + plan.collectible_cells().len(),
        );

        records.push(SpawnRecord {
            kind: EntityKind::Floor,
            position: WorldPosition::new(0.0, 0.0),
            footprint: Footprint {
                body: BodyKind::Static,
                width: transform.floor_size(),
                height: FLOOR_THICKNESS,
                depth: transform.floor_size(),
                elevation: 0.0,
            },
        });

        let hedge = self.wall_footprint(cell_size);
        records.extend(plan.wall_cells().iter().map(|cell| SpawnRecord {
            kind: EntityKind::Wall,
            position: transform.cell_to_world(*cell),
            footprint: hedge,
        }));

        let pickup = pickup_footprint(cell_size);
        records.push(SpawnRecord {
            kind: EntityKind::Goal,
            position: transform.cell_to_world(plan.goal_cell()),
            footprint: pickup,
        });
        records.extend(plan.collectible_cells().iter().map(|cell| SpawnRecord {
            kind: EntityKind::Collectible,
            position: transform.cell_to_world(*cell),
            footprint: pickup,
        }));

        records
    }

    /// Pose the player starts in: standing on the entrance, facing into the maze.
    #[must_use]
    pub fn spawn_pose(&self, plan: &PlacementPlan, transform: &GridTransform) -> SpawnPose {
        SpawnPose {
            position: transform.cell_to_world(plan.entrance_cell()),
            eye_height: EYE_HEIGHT,
            facing: START_FACING,
        }
    }

    fn wall_footprint(&self, cell_size: f32) -> Footprint {
        let edge = cell_size * WALL_MARGIN;
        Footprint {
            body: BodyKind::Static,
            width: edge,
            height: self.config.wall_height,
            depth: edge,
            elevation: 0.0,
        }
    }
}

fn pickup_footprint(cell_size: f32) -> Footprint {
    let edge = cell_size * PICKUP_FOOTPRINT;
    Footprint {
        body: BodyKind::Trigger,
        width: edge,
        height: edge,
        depth: edge,
        elevation: PICKUP_ELEVATION,
    }
}
