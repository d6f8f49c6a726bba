#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score tracking system that counts collectible pickups.

use std::collections::HashSet;

use hedge_maze_core::{Command, EntityId, EntityKind, Event, ScoreState};
use tracing::{debug, info};

/// Configuration parameters required to construct the score tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    win_threshold: u32,
}

impl Config {
    /// Creates a new configuration that wins the session after `win_threshold` pickups.
    #[must_use]
    pub const fn new(win_threshold: u32) -> Self {
        Self { win_threshold }
    }

    /// Pickups required to win.
    #[must_use]
    pub const fn win_threshold(&self) -> u32 {
        self.win_threshold
    }
}

/// Pure system that turns pickup events into score transitions.
///
/// Only collectibles announced through [`Event::EntitySpawned`] count, and
/// each of them counts once. Pickups for unknown or already collected
/// entities are dropped.
#[derive(Clone, Debug)]
pub struct ScoreTracker {
    score: ScoreState,
    live: HashSet<EntityId>,
}

impl ScoreTracker {
    /// Creates a tracker at score zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            score: ScoreState::new(config.win_threshold),
            live: HashSet::new(),
        }
    }

    /// Current score state.
    #[must_use]
    pub const fn score(&self) -> ScoreState {
        self.score
    }

    /// Number of collectibles still waiting to be picked up.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.live.len()
    }

    /// Emits the current score so displays can render it before any pickup.
    pub fn announce(&self, out: &mut Vec<Command>) {
        out.push(Command::PublishScore { score: self.score });
    }

    /// Consumes world events, publishing a new score after each counted pickup.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::EntitySpawned {
                    entity,
                    kind: EntityKind::Collectible,
                    ..
                } => {
                    let _ = self.live.insert(*entity);
                }
                Event::CollectiblePicked { entity } => self.record_pickup(*entity, out),
                _ => {}
            }
        }
    }

    fn record_pickup(&mut self, entity: EntityId, out: &mut Vec<Command>) {
        if !self.live.remove(&entity) {
            debug!(entity = entity.get(), "ignoring pickup of unknown collectible");
            return;
        }

        let was_won = self.score.won();
        self.score = self.score.incremented();
        if self.score.won() && !was_won {
            info!(score = self.score.score(), "all required collectibles gathered");
        }
        out.push(Command::PublishScore { score: self.score });
    }
}
