use std::collections::HashSet;

use hedge_maze_core::{CellCode, CellCoord, Grid, LevelCell, LevelError, REFERENCE_MAZE};
use hedge_maze_system_placement::{Config, PlacementPlan, PlacementPlanner};
use proptest::prelude::*;

fn reference_grid() -> Grid {
    Grid::from_rows(&REFERENCE_MAZE).expect("reference maze is valid")
}

fn reference_planner(collectibles: u32) -> PlacementPlanner {
    PlacementPlanner::new(Config::new(
        CellCoord::new(1, 1),
        CellCoord::new(6, 5),
        collectibles,
    ))
}

fn assert_plan_invariants(grid: &Grid, plan: &PlacementPlan) {
    let walls: HashSet<_> = plan.wall_cells().iter().copied().collect();
    let collectibles: HashSet<_> = plan.collectible_cells().iter().copied().collect();

    assert_eq!(
        collectibles.len(),
        plan.collectible_cells().len(),
        "collectible cells must be distinct"
    );
    assert!(
        !collectibles.contains(&plan.goal_cell()),
        "goal cell must not host a collectible"
    );
    assert!(!walls.contains(&plan.goal_cell()), "goal must not be a wall");
    assert!(
        walls.is_disjoint(&collectibles),
        "collectibles must not overlap walls"
    );

    for cell in plan.wall_cells() {
        assert_eq!(grid.code(*cell), Some(CellCode::Wall));
    }
    for cell in plan.collectible_cells() {
        assert_eq!(grid.code(*cell), Some(CellCode::Open));
    }
    assert_eq!(grid.code(plan.goal_cell()), Some(CellCode::Open));
}

#[test]
fn reference_maze_places_five_collectibles_away_from_goal() {
    let grid = reference_grid();
    let plan = reference_planner(5)
        .plan_with_seed(&grid, 0x5eed)
        .expect("reference level is valid");

    assert_eq!(plan.goal_cell(), CellCoord::new(6, 5));
    assert_eq!(plan.entrance_cell(), CellCoord::new(1, 1));
    assert_eq!(plan.collectible_cells().len(), 5);
    assert_eq!(plan.wall_cells().len() + plan.open_cells().len(), 64);
    assert_plan_invariants(&grid, &plan);
}

#[test]
fn oversized_request_clamps_to_available_cells() {
    let grid = Grid::from_rows(&[
        [1u8, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 1, 1, 1],
        [1, 1, 1, 1, 1],
    ])
    .expect("valid grid");
    let planner = PlacementPlanner::new(Config::new(
        CellCoord::new(1, 1),
        CellCoord::new(3, 2),
        10,
    ));

    let plan = planner.plan_with_seed(&grid, 3).expect("clamping is not an error");

    assert_eq!(plan.open_cells().len(), 7);
    assert_eq!(plan.collectible_cells().len(), 6);
    assert_plan_invariants(&grid, &plan);
}

#[test]
fn same_seed_reproduces_plan() {
    let grid = reference_grid();
    let planner = reference_planner(5);
    let first = planner.plan_with_seed(&grid, 42).expect("valid plan");
    let second = planner.plan_with_seed(&grid, 42).expect("valid plan");
    assert_eq!(first, second, "plans diverged for identical seeds");
}

#[test]
fn different_seeds_only_change_collectibles() {
    let grid = reference_grid();
    let planner = reference_planner(5);
    let baseline = planner.plan_with_seed(&grid, 1).expect("valid plan");

    let mut collectible_sets = HashSet::new();
    for seed in 1..32 {
        let plan = planner.plan_with_seed(&grid, seed).expect("valid plan");
        assert_eq!(plan.wall_cells(), baseline.wall_cells());
        assert_eq!(plan.open_cells(), baseline.open_cells());
        assert_eq!(plan.goal_cell(), baseline.goal_cell());

        let mut cells = plan.collectible_cells().to_vec();
        cells.sort();
        let _ = collectible_sets.insert(cells);
    }

    assert!(
        collectible_sets.len() > 1,
        "collectible placement should vary across seeds"
    );
}

#[test]
fn every_candidate_cell_is_eventually_chosen() {
    let grid = reference_grid();
    let planner = reference_planner(1);
    let baseline = planner.plan_with_seed(&grid, 0).expect("valid plan");
    let candidates: HashSet<_> = baseline
        .open_cells()
        .iter()
        .copied()
        .filter(|cell| *cell != baseline.goal_cell())
        .collect();

    let mut chosen = HashSet::new();
    for seed in 0..2_000 {
        let plan = planner.plan_with_seed(&grid, seed).expect("valid plan");
        let _ = chosen.insert(plan.collectible_cells()[0]);
    }

    assert_eq!(chosen, candidates, "sampling must cover the whole pool");
}

#[test]
fn exit_on_wall_is_a_configuration_error() {
    let grid = reference_grid();
    let planner = PlacementPlanner::new(Config::new(
        CellCoord::new(1, 1),
        CellCoord::new(0, 0),
        5,
    ));

    assert_eq!(
        planner.plan_with_seed(&grid, 0),
        Err(LevelError::CellIsWall {
            role: LevelCell::Exit,
            cell: CellCoord::new(0, 0),
        })
    );
}

#[test]
fn entrance_on_wall_is_a_configuration_error() {
    let grid = reference_grid();
    let planner = PlacementPlanner::new(Config::new(
        CellCoord::new(0, 0),
        CellCoord::new(6, 5),
        5,
    ));

    assert_eq!(
        planner.plan_with_seed(&grid, 0),
        Err(LevelError::CellIsWall {
            role: LevelCell::Entrance,
            cell: CellCoord::new(0, 0),
        })
    );
}

#[test]
fn entrance_outside_grid_is_a_configuration_error() {
    let grid = reference_grid();
    let planner = PlacementPlanner::new(Config::new(
        CellCoord::new(9, 1),
        CellCoord::new(6, 5),
        5,
    ));

    assert_eq!(
        planner.plan_with_seed(&grid, 0),
        Err(LevelError::CellOutOfBounds {
            role: LevelCell::Entrance,
            cell: CellCoord::new(9, 1),
        })
    );
}

fn open_grid_strategy() -> impl Strategy<Value = (Vec<Vec<u8>>, CellCoord, CellCoord)> {
    (2u32..10, 2u32..10).prop_flat_map(|(columns, rows)| {
        let layout = prop::collection::vec(
            prop::collection::vec(0u8..=1, columns as usize),
            rows as usize,
        );
        (layout, 0..columns, 0..rows, 0..columns, 0..rows).prop_map(
            |(mut layout, entrance_column, entrance_row, exit_column, exit_row)| {
                layout[entrance_row as usize][entrance_column as usize] = 0;
                layout[exit_row as usize][exit_column as usize] = 0;
                (
                    layout,
                    CellCoord::new(entrance_column, entrance_row),
                    CellCoord::new(exit_column, exit_row),
                )
            },
        )
    })
}

proptest! {
    #[test]
    fn plans_are_disjoint_and_correctly_classified(
        (layout, entrance, exit) in open_grid_strategy(),
        collectibles in 0u32..40,
        seed in any::<u64>(),
    ) {
        let grid = Grid::from_rows(&layout).expect("generated grid is rectangular");
        let planner = PlacementPlanner::new(Config::new(entrance, exit, collectibles));
        let plan = planner.plan_with_seed(&grid, seed).expect("entrance and exit are open");

        let available = plan.open_cells().len() - 1;
        prop_assert_eq!(
            plan.collectible_cells().len(),
            (collectibles as usize).min(available)
        );
        assert_plan_invariants(&grid, &plan);
    }
}
