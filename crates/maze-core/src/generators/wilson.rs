//! Wilson's algorithm: loop-erased random walks over parity-offset rooms.
//!
//! Each walk starts at a room outside the maze and wanders two cells at a
//! time until it touches the maze; loops are erased as they form. Carving a
//! finished walk adds every room on it plus the wall cells between adjacent
//! pairs. Out-of-bounds direction draws are skipped but still consume a draw.

use super::{parity_rooms, pick_passage};
use crate::grid::{Grid, MazeSpec, PASSAGE, Point, WALL};
use crate::rng::Lcg;

const STEPS: [(i64, i64); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

pub(super) fn generate(rows: u32, cols: u32, rng: &mut Lcg) -> MazeSpec {
    let offset: u32 = if rng.coin() { 0 } else { 1 };
    let mut grid = Grid::filled(rows, cols, WALL);
    let rooms = parity_rooms(rows, cols, offset);
    let total = rows as usize * cols as usize;
    let at = |p: Point| p.y as usize * cols as usize + p.x as usize;

    let mut in_maze = vec![false; total];
    let seed_room = rooms[rng.rand_int(rooms.len())];
    grid.set(seed_room.x, seed_room.y, PASSAGE);
    in_maze[at(seed_room)] = true;

    loop {
        let remaining: Vec<Point> = rooms
            .iter()
            .copied()
            .filter(|room| !in_maze[at(*room)])
            .collect();
        if remaining.is_empty() {
            break;
        }
        let root = remaining[rng.rand_int(remaining.len())];

        let mut path = vec![root];
        let mut walk_index: Vec<Option<usize>> = vec![None; total];
        walk_index[at(root)] = Some(0);
        let mut head = root;
        loop {
            let (dx, dy) = STEPS[rng.rand_int(STEPS.len())];
            let nx = i64::from(head.x) + dx;
            let ny = i64::from(head.y) + dy;
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            let cell = Point::new(nx as u32, ny as u32);
            if in_maze[at(cell)] {
                path.push(cell);
                break;
            }
            if let Some(idx) = walk_index[at(cell)] {
                // Loop erasure: drop everything after the revisited room.
                for dropped in &path[idx + 1..] {
                    walk_index[at(*dropped)] = None;
                }
                path.truncate(idx + 1);
                head = cell;
                continue;
            }
            walk_index[at(cell)] = Some(path.len());
            path.push(cell);
            head = cell;
        }

        for i in 0..path.len() {
            let cell = path[i];
            grid.set(cell.x, cell.y, PASSAGE);
            in_maze[at(cell)] = true;
            if i + 1 < path.len() {
                let next = path[i + 1];
                grid.set((cell.x + next.x) / 2, (cell.y + next.y) / 2, PASSAGE);
            }
        }
    }

    let start = pick_passage(rng, &grid);
    let mut goal = pick_passage(rng, &grid);
    if goal == start {
        goal = pick_passage(rng, &grid);
    }
    MazeSpec { grid, start, goal }
}
