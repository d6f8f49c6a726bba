#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that loads a level and schedules the per-tick systems.
//!
//! A [`Session`] owns the authoritative world and every system instance.
//! Adapters drive it with one [`Session::tick`] per rendered frame and forward
//! host input through [`Session::move_player`] and [`Session::pick_up`]. Each
//! entry point applies the resulting commands, lets the systems react to the
//! broadcast events, and repeats until no system has anything left to say.

mod level;

use std::time::Duration;

use hedge_maze_core::{Command, EntityId, Event, GridTransform, ScoreState, WorldPosition};
use hedge_maze_system_placement::{PlacementPlan, PlacementPlanner};
use hedge_maze_system_proximity::{MonitorState, ProximityMonitor};
use hedge_maze_system_scoring::{Config as ScoringConfig, ScoreTracker};
use hedge_maze_system_spawning::SpawnDirector;
use hedge_maze_world::{self as world, query, World};
use tracing::{info, warn};

pub use hedge_maze_core::LevelError;
pub use level::{Level, LevelConfig};

/// Running game session: the world plus the systems observing it.
#[derive(Debug)]
pub struct Session {
    world: World,
    plan: PlacementPlan,
    transform: GridTransform,
    seed: u64,
    monitor: ProximityMonitor,
    tracker: ScoreTracker,
}

impl Session {
    /// Plans and spawns `level`, returning a session ready for its first tick.
    ///
    /// `seed` drives collectible placement unless the level fixes its own.
    /// Events produced while populating the world are appended to `out_events`.
    pub fn start(level: &Level, seed: u64, out_events: &mut Vec<Event>) -> Result<Self, LevelError> {
        let seed = level.seed.unwrap_or(seed);
        let plan = PlacementPlanner::new(level.placement).plan_with_seed(&level.grid, seed)?;

        let planned = u32::try_from(plan.collectible_cells().len()).unwrap_or(u32::MAX);
        let mut win_threshold = level.win_threshold;
        if planned > 0 && win_threshold > planned {
            warn!(
                requested = win_threshold,
                planned, "win threshold exceeds collectibles, lowering it"
            );
            win_threshold = planned;
        }

        let mut session = Self {
            world: World::new(),
            plan,
            transform: level.transform,
            seed,
            monitor: ProximityMonitor::new(level.proximity),
            tracker: ScoreTracker::new(ScoringConfig::new(win_threshold)),
        };

        let mut commands = Vec::new();
        SpawnDirector::new(level.spawning).handle(&session.plan, &session.transform, &mut commands);
        session.pump(commands, out_events);

        let mut commands = Vec::new();
        session.tracker.announce(&mut commands);
        session.pump(commands, out_events);

        info!(
            seed,
            walls = session.plan.wall_cells().len(),
            collectibles = session.plan.collectible_cells().len(),
            win_threshold,
            "session started"
        );
        Ok(session)
    }

    /// Advances the session by one frame.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.pump(vec![Command::Tick { dt }], out_events);
    }

    /// Forwards the avatar's latest position from host input.
    pub fn move_player(&mut self, position: WorldPosition, out_events: &mut Vec<Event>) {
        self.pump(vec![Command::MovePlayer { position }], out_events);
    }

    /// Forwards a pickup reported by the host's interaction layer.
    pub fn pick_up(&mut self, entity: EntityId, out_events: &mut Vec<Event>) {
        self.pump(vec![Command::PickUpCollectible { entity }], out_events);
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Layout planned for this session.
    #[must_use]
    pub fn plan(&self) -> &PlacementPlan {
        &self.plan
    }

    /// Mapping from maze cells into world space.
    #[must_use]
    pub fn transform(&self) -> GridTransform {
        self.transform
    }

    /// Seed used for collectible placement.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> ScoreState {
        self.tracker.score()
    }

    /// Lifecycle of the goal proximity monitor.
    #[must_use]
    pub fn monitor_state(&self) -> MonitorState {
        self.monitor.state()
    }

    fn pump(&mut self, mut commands: Vec<Command>, out_events: &mut Vec<Event>) {
        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }

            self.tracker.handle(&events, &mut commands);
            self.monitor.handle(
                &events,
                query::player_position(&self.world),
                query::goal_position(&self.world),
                &mut commands,
            );
            out_events.append(&mut events);
        }
    }
}
