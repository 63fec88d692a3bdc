//! Maze generation algorithms and their registry.
//!
//! Every generator draws randomness exclusively from the shared [`Lcg`] and
//! in a fixed order, so the produced maze is fully determined by the seed.
//! All of them return a [`MazeSpec`] whose endpoints are distinct passage
//! cells.

mod cellular_automata;
mod dfs;
mod drunkards_walk;
mod kruskal;
mod searchformer;
mod wilson;

use thiserror::Error;

use crate::grid::{Grid, MazeSpec, PASSAGE, Point};
use crate::rng::Lcg;

/// Tunable generation knobs. Each generator reads only the fields it
/// documents; the rest are ignored.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorParams {
    /// drunkards_walk: fraction of all cells to carve, in `(0, 1]`.
    pub coverage: f64,
    /// cellular_automata: probability that a cell starts as a wall.
    pub fill_probability: f64,
    /// cellular_automata: walls with fewer alive neighbors open up.
    pub survival_threshold: u32,
    /// cellular_automata: passages with more alive neighbors close.
    pub birth_threshold: u32,
    /// cellular_automata: smoothing iterations.
    pub iterations: u32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            coverage: 0.5,
            fill_probability: 0.45,
            survival_threshold: 4,
            birth_threshold: 5,
            iterations: 3,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("grid ended up with fewer than two passage cells to place endpoints on")]
    TooFewFloorCells,
}

/// Registered maze generators, dispatched by dataset configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorKind {
    CellularAutomata,
    Dfs,
    DrunkardsWalk,
    Kruskal,
    Searchformer,
    Wilson,
}

impl GeneratorKind {
    /// Look up a generator by its dataset name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cellular_automata" => Some(Self::CellularAutomata),
            "dfs" => Some(Self::Dfs),
            "drunkards_walk" => Some(Self::DrunkardsWalk),
            "kruskal" => Some(Self::Kruskal),
            "searchformer" => Some(Self::Searchformer),
            "wilson" => Some(Self::Wilson),
            _ => None,
        }
    }

    /// All registered names, sorted.
    pub fn names() -> &'static [&'static str] {
        &[
            "cellular_automata",
            "dfs",
            "drunkards_walk",
            "kruskal",
            "searchformer",
            "wilson",
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CellularAutomata => "cellular_automata",
            Self::Dfs => "dfs",
            Self::DrunkardsWalk => "drunkards_walk",
            Self::Kruskal => "kruskal",
            Self::Searchformer => "searchformer",
            Self::Wilson => "wilson",
        }
    }

    /// Generate one maze, consuming draws from `rng`.
    pub fn generate(
        self,
        rows: u32,
        cols: u32,
        rng: &mut Lcg,
        params: &GeneratorParams,
    ) -> Result<MazeSpec, GeneratorError> {
        match self {
            Self::CellularAutomata => cellular_automata::generate(rows, cols, rng, params),
            Self::Dfs => Ok(dfs::generate(rows, cols, rng)),
            Self::DrunkardsWalk => drunkards_walk::generate(rows, cols, rng, params.coverage),
            Self::Kruskal => Ok(kruskal::generate(rows, cols, rng)),
            Self::Searchformer => Ok(searchformer::generate(rows, cols, rng)),
            Self::Wilson => Ok(wilson::generate(rows, cols, rng)),
        }
    }
}

/// Rejection-sample a passage cell; the x draw comes before the y draw.
pub(crate) fn pick_passage(rng: &mut Lcg, grid: &Grid) -> Point {
    loop {
        let x = rng.rand_int(grid.cols() as usize) as u32;
        let y = rng.rand_int(grid.rows() as usize) as u32;
        if grid.is_passage(x, y) {
            return Point::new(x, y);
        }
    }
}

/// All passage cells in row-major order.
pub(crate) fn passage_cells(grid: &Grid) -> Vec<Point> {
    let mut cells = Vec::new();
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            if grid.is_passage(x, y) {
                cells.push(Point::new(x, y));
            }
        }
    }
    cells
}

/// Endpoint pair drawn as indices into the row-major passage list: one draw
/// for the start, then repeated draws for the goal until it differs.
pub(crate) fn pick_endpoints_by_index(
    rng: &mut Lcg,
    grid: &Grid,
) -> Result<(Point, Point), GeneratorError> {
    let floors = passage_cells(grid);
    if floors.len() < 2 {
        return Err(GeneratorError::TooFewFloorCells);
    }
    let a = rng.rand_int(floors.len());
    let b = loop {
        let b = rng.rand_int(floors.len());
        if b != a {
            break b;
        }
    };
    Ok((floors[a], floors[b]))
}

/// Cells whose coordinates both share the parity `offset`, enumerated
/// row-major. These are the connectivity-graph vertices of the kruskal and
/// wilson generators; the cell between two adjacent rooms is the wall that
/// gets carved.
pub(crate) fn parity_rooms(rows: u32, cols: u32, offset: u32) -> Vec<Point> {
    let mut rooms = Vec::new();
    let mut y = offset;
    while y < rows {
        let mut x = offset;
        while x < cols {
            rooms.push(Point::new(x, y));
            x += 2;
        }
        y += 2;
    }
    rooms
}
