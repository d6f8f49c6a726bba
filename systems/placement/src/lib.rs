#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement planner that turns a maze grid into a complete spawn layout.
//!
//! The planner classifies every cell of the [`Grid`], pins the goal to the
//! configured exit and scatters collectibles across the remaining open cells.
//! Plans are built eagerly and handed out whole; nothing observes a partially
//! populated plan.

use hedge_maze_core::{CellCode, CellCoord, Grid, LevelCell, LevelError};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Configuration parameters required to construct the planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    entrance: CellCoord,
    exit: CellCoord,
    collectible_count: u32,
}

impl Config {
    /// Creates a new configuration for the provided entrance, exit and pickup count.
    #[must_use]
    pub const fn new(entrance: CellCoord, exit: CellCoord, collectible_count: u32) -> Self {
        Self {
            entrance,
            exit,
            collectible_count,
        }
    }

    /// Cell where the player starts.
    #[must_use]
    pub const fn entrance(&self) -> CellCoord {
        self.entrance
    }

    /// Cell hosting the goal marker.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        self.exit
    }

    /// Number of collectibles requested by the level.
    #[must_use]
    pub const fn collectible_count(&self) -> u32 {
        self.collectible_count
    }
}

/// Immutable spawn layout derived from a grid.
///
/// Wall cells, the goal cell and collectible cells are pairwise disjoint. The
/// goal and every collectible sit on open cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementPlan {
    wall_cells: Vec<CellCoord>,
    open_cells: Vec<CellCoord>,
    entrance_cell: CellCoord,
    goal_cell: CellCoord,
    collectible_cells: Vec<CellCoord>,
}

impl PlacementPlan {
    /// Hedge cells in row-major order.
    #[must_use]
    pub fn wall_cells(&self) -> &[CellCoord] {
        &self.wall_cells
    }

    /// Every walkable cell in row-major order, goal included.
    #[must_use]
    pub fn open_cells(&self) -> &[CellCoord] {
        &self.open_cells
    }

    /// Cell where the player starts.
    #[must_use]
    pub const fn entrance_cell(&self) -> CellCoord {
        self.entrance_cell
    }

    /// Cell hosting the goal marker.
    #[must_use]
    pub const fn goal_cell(&self) -> CellCoord {
        self.goal_cell
    }

    /// Cells chosen for collectibles, in draw order.
    #[must_use]
    pub fn collectible_cells(&self) -> &[CellCoord] {
        &self.collectible_cells
    }
}

/// Pure system that produces [`PlacementPlan`] values.
#[derive(Clone, Copy, Debug)]
pub struct PlacementPlanner {
    config: Config,
}

impl PlacementPlanner {
    /// Creates a planner using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Plans a layout drawing collectibles from a ChaCha stream seeded with `seed`.
    ///
    /// Identical seeds produce identical plans.
    pub fn plan_with_seed(&self, grid: &Grid, seed: u64) -> Result<PlacementPlan, LevelError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.plan(grid, &mut rng)
    }

    /// Plans a layout drawing collectibles from the provided random source.
    ///
    /// Collectibles are sampled uniformly without replacement from the open
    /// cells other than the goal. Requests larger than that pool are clamped
    /// to its size.
    pub fn plan<R>(&self, grid: &Grid, rng: &mut R) -> Result<PlacementPlan, LevelError>
    where
        R: Rng + ?Sized,
    {
        let entrance_cell = require_open(grid, LevelCell::Entrance, self.config.entrance)?;
        let goal_cell = require_open(grid, LevelCell::Exit, self.config.exit)?;

        let mut wall_cells = Vec::new();
        let mut open_cells = Vec::new();
        for (cell, code) in grid.cells() {
            match code {
                CellCode::Wall => wall_cells.push(cell),
                CellCode::Open => open_cells.push(cell),
            }
        }

        let pool: Vec<CellCoord> = open_cells
            .iter()
            .copied()
            .filter(|cell| *cell != goal_cell)
            .collect();

        let requested = usize::try_from(self.config.collectible_count).unwrap_or(usize::MAX);
        if requested > pool.len() {
            warn!(
                requested,
                available = pool.len(),
                "not enough open cells for collectibles, clamping"
            );
        }
        let collectible_cells: Vec<CellCoord> =
            pool.choose_multiple(rng, requested).copied().collect();

        debug!(
            walls = wall_cells.len(),
            open = open_cells.len(),
            collectibles = collectible_cells.len(),
            "placement planned"
        );

        Ok(PlacementPlan {
            wall_cells,
            open_cells,
            entrance_cell,
            goal_cell,
            collectible_cells,
        })
    }
}

fn require_open(grid: &Grid, role: LevelCell, cell: CellCoord) -> Result<CellCoord, LevelError> {
    match grid.code(cell) {
        None => Err(LevelError::CellOutOfBounds { role, cell }),
        Some(CellCode::Wall) => Err(LevelError::CellIsWall { role, cell }),
        Some(CellCode::Open) => Ok(cell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        Grid::from_rows(&[[1u8, 1, 1, 1], [1, 0, 0, 1], [1, 1, 1, 1]]).expect("valid grid")
    }

    #[test]
    fn zero_collectibles_yield_empty_selection() {
        let planner = PlacementPlanner::new(Config::new(
            CellCoord::new(1, 1),
            CellCoord::new(2, 1),
            0,
        ));
        let plan = planner.plan_with_seed(&corridor(), 7).expect("valid plan");
        assert!(plan.collectible_cells().is_empty());
        assert_eq!(plan.wall_cells().len(), 10);
        assert_eq!(plan.open_cells().len(), 2);
    }

    #[test]
    fn single_free_cell_is_always_chosen() {
        let planner = PlacementPlanner::new(Config::new(
            CellCoord::new(1, 1),
            CellCoord::new(2, 1),
            3,
        ));
        let plan = planner.plan_with_seed(&corridor(), 99).expect("valid plan");
        assert_eq!(plan.collectible_cells(), &[CellCoord::new(1, 1)]);
    }
}
