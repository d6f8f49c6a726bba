#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick goal proximity monitor.
//!
//! The host does not reliably report the avatar entering the goal's trigger
//! volume, so the monitor polls the distance between the player and the goal
//! on every tick instead of waiting for a collision callback.

use hedge_maze_core::{Command, Event, WorldPosition};
use tracing::warn;

const DEFAULT_TRIGGER_RADIUS: f32 = 1.2;

/// Configuration parameters required to construct the proximity monitor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    trigger_radius: f32,
}

impl Config {
    /// Creates a new configuration firing within `trigger_radius` world units of the goal.
    #[must_use]
    pub const fn new(trigger_radius: f32) -> Self {
        Self { trigger_radius }
    }

    /// Planar distance below which the goal counts as reached.
    #[must_use]
    pub const fn trigger_radius(&self) -> f32 {
        self.trigger_radius
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_RADIUS)
    }
}

/// Lifecycle of the monitor within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonitorState {
    /// Waiting for the player to approach the goal.
    Armed,
    /// Goal already reached; the monitor stays silent for the rest of the session.
    Triggered,
}

/// Pure system that emits a single [`Command::ReachGoal`] once the player nears the goal.
#[derive(Clone, Debug)]
pub struct ProximityMonitor {
    trigger_radius: f32,
    state: MonitorState,
}

impl ProximityMonitor {
    /// Creates an armed monitor using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            trigger_radius: config.trigger_radius,
            state: MonitorState::Armed,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> MonitorState {
        self.state
    }

    /// Polls the player's distance to the goal when the batch contains a tick.
    pub fn handle(
        &mut self,
        events: &[Event],
        player: Option<WorldPosition>,
        goal: Option<WorldPosition>,
        out: &mut Vec<Command>,
    ) {
        if self.state == MonitorState::Triggered {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let (Some(player), Some(goal)) = (player, goal) else {
            return;
        };
        if !player.is_finite() {
            warn!(?player, "skipping proximity check for non-finite player position");
            return;
        }

        if player.distance_to(goal) < self.trigger_radius {
            self.state = MonitorState::Triggered;
            out.push(Command::ReachGoal);
        }
    }
}

impl Default for ProximityMonitor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
