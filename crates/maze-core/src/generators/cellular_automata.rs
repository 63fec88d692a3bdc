//! Cave-style generator: random fill followed by cellular-automaton
//! smoothing. Cells outside the grid count as alive, which biases the
//! border toward solid rock. No connectivity check is performed; the
//! downstream solver surfaces disconnected endpoint pairs as a hard error.

use super::{GeneratorError, GeneratorParams, pick_endpoints_by_index};
use crate::grid::{Grid, MazeSpec, PASSAGE, WALL};
use crate::rng::Lcg;

pub(super) fn generate(
    rows: u32,
    cols: u32,
    rng: &mut Lcg,
    params: &GeneratorParams,
) -> Result<MazeSpec, GeneratorError> {
    let mut grid = Grid::filled(rows, cols, PASSAGE);
    for y in 0..rows {
        for x in 0..cols {
            let cell = if rng.draw() < params.fill_probability {
                WALL
            } else {
                PASSAGE
            };
            grid.set(x, y, cell);
        }
    }

    for _ in 0..params.iterations {
        let mut next = Grid::filled(rows, cols, PASSAGE);
        for y in 0..rows {
            for x in 0..cols {
                let alive = walls_around(&grid, x, y);
                let value = if grid.get(x, y) == WALL {
                    if alive < params.survival_threshold {
                        PASSAGE
                    } else {
                        WALL
                    }
                } else if alive > params.birth_threshold {
                    WALL
                } else {
                    PASSAGE
                };
                next.set(x, y, value);
            }
        }
        grid = next;
    }

    let (start, goal) = pick_endpoints_by_index(rng, &grid)?;
    Ok(MazeSpec { grid, start, goal })
}

/// Alive (wall) count over the 8-neighborhood; off-grid neighbors are alive.
fn walls_around(grid: &Grid, x: u32, y: u32) -> u32 {
    let mut alive = 0;
    for dy in -1..=1i64 {
        for dx in -1..=1i64 {
            if dx == 0 && dy == 0 {
                continue;
            }
            match grid.cell_at(i64::from(x) + dx, i64::from(y) + dy) {
                Some(PASSAGE) => {}
                _ => alive += 1,
            }
        }
    }
    alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;

    #[test]
    fn known_maze_for_seed_33() {
        let mut rng = Lcg::new(33);
        let spec = generate(6, 6, &mut rng, &GeneratorParams::default())
            .expect("default params succeed on seed 33");
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            0, 0, 0, 0, 0, 0,
            0, 1, 1, 1, 1, 0,
            1, 1, 1, 1, 1, 1,
            1, 1, 1, 1, 1, 1,
            0, 1, 1, 0, 0, 0,
            0, 0, 0, 0, 0, 0,
        ];
        assert_eq!(spec.grid.cells(), expected.as_slice());
        assert_eq!(spec.start, Point::new(5, 3));
        assert_eq!(spec.goal, Point::new(1, 2));
    }

    #[test]
    fn all_walls_fill_reports_too_few_floors() {
        let mut rng = Lcg::new(1);
        let params = GeneratorParams {
            fill_probability: 1.0,
            ..GeneratorParams::default()
        };
        assert!(matches!(
            generate(8, 8, &mut rng, &params),
            Err(GeneratorError::TooFewFloorCells)
        ));
    }

    #[test]
    fn zero_iterations_keeps_the_raw_fill() {
        let params = GeneratorParams {
            iterations: 0,
            ..GeneratorParams::default()
        };
        let mut a = Lcg::new(8);
        let mut b = Lcg::new(8);
        let raw = generate(7, 7, &mut a, &params).expect("raw fill has floors");
        let again = generate(7, 7, &mut b, &params).expect("raw fill has floors");
        assert_eq!(raw, again);
    }

    #[test]
    fn off_grid_neighbors_count_as_alive() {
        let grid = Grid::filled(3, 3, PASSAGE);
        assert_eq!(walls_around(&grid, 0, 0), 5);
        assert_eq!(walls_around(&grid, 1, 0), 3);
        assert_eq!(walls_around(&grid, 1, 1), 0);
    }
}
