//! Scattered-wall generator that keeps only mazes with a long shortest path.
//!
//! Walls are sampled as a shuffled prefix of all cell indices (between 30%
//! and 50% of the grid). Endpoint pairs are then drawn from the free cells
//! until A* finds a plan at least `max(rows, cols)` cells long; after 100
//! failed pairs the wall layout itself is resampled.

use log::debug;

use crate::grid::{Grid, MazeSpec, PASSAGE, Point, WALL};
use crate::rng::Lcg;
use crate::solver::{manhattan, solve_astar};

const ENDPOINT_ATTEMPTS: usize = 100;

pub(super) fn generate(rows: u32, cols: u32, rng: &mut Lcg) -> MazeSpec {
    let total = rows as usize * cols as usize;
    let base = total / 10;
    let min_walls = 3 * base;
    let max_walls = 5 * base;
    let min_plan_len = rows.max(cols) as usize;
    let cell_of = |idx: usize| Point::new((idx % cols as usize) as u32, (idx / cols as usize) as u32);

    loop {
        let mut indices: Vec<usize> = (0..total).collect();
        rng.shuffle(&mut indices);
        let num_walls = min_walls + rng.rand_int(max_walls - min_walls + 1);

        let mut grid = Grid::filled(rows, cols, PASSAGE);
        for &idx in &indices[..num_walls] {
            let cell = cell_of(idx);
            grid.set(cell.x, cell.y, WALL);
        }

        let mut free: Vec<usize> = indices[num_walls..].to_vec();
        for _ in 0..ENDPOINT_ATTEMPTS {
            rng.shuffle(&mut free);
            let start = cell_of(free[0]);
            let goal = cell_of(free[1]);
            let trace = solve_astar(&grid, start, goal, manhattan);
            if let Some(plan) = trace.plan {
                if plan.len() >= min_plan_len {
                    return MazeSpec { grid, start, goal };
                }
            }
        }
        debug!("no endpoint pair yielded a plan of {min_plan_len}+ cells; resampling walls");
    }
}
