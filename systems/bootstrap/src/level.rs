//! Level configuration as loaded from disk, and its validated form.

use hedge_maze_core::{CellCoord, Grid, GridTransform, LevelError, REFERENCE_MAZE};
use hedge_maze_system_placement::Config as PlacementConfig;
use hedge_maze_system_proximity::Config as ProximityConfig;
use hedge_maze_system_spawning::Config as SpawnConfig;
use serde::Deserialize;

const DEFAULT_COLLECTIBLES: i64 = 5;
const DEFAULT_FLOOR_SIZE: f32 = 100.0;
const DEFAULT_WALL_HEIGHT: f32 = 4.0;
const DEFAULT_TRIGGER_RADIUS: f32 = 1.2;

/// Raw level description, typically deserialized from TOML.
///
/// Missing fields fall back to the reference level.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Maze rows, `1` for hedges and `0` for open ground.
    pub maze: Vec<Vec<u8>>,
    /// Cell where the player starts.
    pub entrance: CellCoord,
    /// Cell hosting the goal marker.
    pub exit: CellCoord,
    /// Number of collectibles to scatter through the maze.
    pub collectibles: i64,
    /// Side length of the square floor in world units.
    pub floor_size: f32,
    /// Height of hedge blocks in world units.
    pub wall_height: f32,
    /// Distance from the goal at which it counts as reached.
    pub trigger_radius: f32,
    /// Pickups required to win; defaults to the collectible count.
    pub win_threshold: Option<u32>,
    /// Seed for collectible placement; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            maze: REFERENCE_MAZE.iter().map(|row| row.to_vec()).collect(),
            entrance: CellCoord::new(1, 1),
            exit: CellCoord::new(6, 5),
            collectibles: DEFAULT_COLLECTIBLES,
            floor_size: DEFAULT_FLOOR_SIZE,
            wall_height: DEFAULT_WALL_HEIGHT,
            trigger_radius: DEFAULT_TRIGGER_RADIUS,
            win_threshold: None,
            seed: None,
        }
    }
}

impl LevelConfig {
    /// Checks every field and produces a [`Level`] ready to start a session.
    pub fn validate(&self) -> Result<Level, LevelError> {
        let grid = Grid::from_rows(&self.maze)?;
        let transform = GridTransform::for_grid(&grid, self.floor_size)?;

        if self.collectibles < 0 {
            return Err(LevelError::NegativeCollectibleCount(self.collectibles));
        }
        let collectibles = u32::try_from(self.collectibles).unwrap_or(u32::MAX);

        if !self.wall_height.is_finite() || self.wall_height <= 0.0 {
            return Err(LevelError::InvalidWallHeight(self.wall_height));
        }
        if !self.trigger_radius.is_finite() || self.trigger_radius <= 0.0 {
            return Err(LevelError::InvalidTriggerRadius(self.trigger_radius));
        }

        let win_threshold = match self.win_threshold {
            Some(0) => return Err(LevelError::ZeroWinThreshold),
            Some(threshold) => threshold,
            None => collectibles.max(1),
        };

        Ok(Level {
            grid,
            transform,
            placement: PlacementConfig::new(self.entrance, self.exit, collectibles),
            spawning: SpawnConfig::new(self.wall_height),
            proximity: ProximityConfig::new(self.trigger_radius),
            win_threshold,
            seed: self.seed,
        })
    }
}

/// Validated level ready to be turned into a session.
#[derive(Clone, Debug)]
pub struct Level {
    pub(crate) grid: Grid,
    pub(crate) transform: GridTransform,
    pub(crate) placement: PlacementConfig,
    pub(crate) spawning: SpawnConfig,
    pub(crate) proximity: ProximityConfig,
    pub(crate) win_threshold: u32,
    pub(crate) seed: Option<u64>,
}

impl Level {
    /// Maze layout of the level.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mapping from maze cells into world space.
    #[must_use]
    pub fn transform(&self) -> GridTransform {
        self.transform
    }

    /// Pickups required to win, before clamping to the planned collectibles.
    #[must_use]
    pub fn win_threshold(&self) -> u32 {
        self.win_threshold
    }

    /// Seed fixed by the level file, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
