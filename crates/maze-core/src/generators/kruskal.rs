//! Randomized Kruskal over parity-offset rooms.
//!
//! Rooms sit on every other cell in both axes; the offset (0 or 1) is itself
//! a coin flip, so mazes alternate between hugging and avoiding the border.
//! Shuffled edges are merged through a union-find until all rooms connect.

use super::{parity_rooms, pick_passage};
use crate::grid::{Grid, MazeSpec, PASSAGE, Point, WALL};
use crate::rng::Lcg;

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    /// Find with full path compression.
    fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cursor = item;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        self.parent[root_a] = root_b;
    }
}

/// An edge between two adjacent rooms and the wall cell between them.
struct Edge {
    a: Point,
    b: Point,
    wall: Point,
}

pub(super) fn generate(rows: u32, cols: u32, rng: &mut Lcg) -> MazeSpec {
    let offset: u32 = if rng.coin() { 0 } else { 1 };
    let mut grid = Grid::filled(rows, cols, WALL);
    let rooms = parity_rooms(rows, cols, offset);
    for room in &rooms {
        grid.set(room.x, room.y, PASSAGE);
    }

    let rooms_per_row = (cols.saturating_sub(offset) + 1) / 2;
    let room_index =
        |p: Point| (((p.y - offset) / 2) * rooms_per_row + (p.x - offset) / 2) as usize;

    let mut edges = Vec::new();
    for &room in &rooms {
        if room.x + 2 < cols {
            edges.push(Edge {
                a: room,
                b: Point::new(room.x + 2, room.y),
                wall: Point::new(room.x + 1, room.y),
            });
        }
        if room.y + 2 < rows {
            edges.push(Edge {
                a: room,
                b: Point::new(room.x, room.y + 2),
                wall: Point::new(room.x, room.y + 1),
            });
        }
    }
    rng.shuffle(&mut edges);

    let mut sets = DisjointSet::new(rooms.len());
    for edge in &edges {
        let a = room_index(edge.a);
        let b = room_index(edge.b);
        if sets.find(a) != sets.find(b) {
            sets.union(a, b);
            grid.set(edge.wall.x, edge.wall.y, PASSAGE);
        }
    }

    let start = pick_passage(rng, &grid);
    let mut goal = pick_passage(rng, &grid);
    if goal == start {
        goal = pick_passage(rng, &grid);
    }
    MazeSpec { grid, start, goal }
}
