//! Drunkard's walk: a single agent stumbles around carving until the target
//! fraction of cells is open. Already-carved cells are stepped through
//! without counting, so low coverages produce tight caves and high coverages
//! approach an open field.

use super::{GeneratorError, pick_endpoints_by_index};
use crate::grid::{Grid, MazeSpec, PASSAGE, WALL};
use crate::rng::Lcg;

const STEPS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(super) fn generate(
    rows: u32,
    cols: u32,
    rng: &mut Lcg,
    coverage: f64,
) -> Result<MazeSpec, GeneratorError> {
    let total = rows as usize * cols as usize;
    let target = ((total as f64 * coverage) as usize).min(total).max(2);

    let mut grid = Grid::filled(rows, cols, WALL);
    let mut x = rng.rand_int(cols as usize) as i64;
    let mut y = rng.rand_int(rows as usize) as i64;
    grid.set(x as u32, y as u32, PASSAGE);
    let mut carved = 1usize;

    while carved < target {
        let mut moves: Vec<(i64, i64)> = Vec::with_capacity(4);
        for (dx, dy) in STEPS {
            if grid.in_bounds(x + dx, y + dy) {
                moves.push((dx, dy));
            }
        }
        let (dx, dy) = moves[rng.rand_int(moves.len())];
        x += dx;
        y += dy;
        if grid.get(x as u32, y as u32) == WALL {
            grid.set(x as u32, y as u32, PASSAGE);
            carved += 1;
        }
    }

    let (start, goal) = pick_endpoints_by_index(rng, &grid)?;
    Ok(MazeSpec { grid, start, goal })
}
