//! Deterministic maze generation and A* search tracing.
//!
//! Everything in this crate is a pure function of its inputs: the seeded
//! [`rng::Lcg`] is the only source of randomness, and each algorithm consumes
//! draws in a fixed order so that a given seed reproduces the same maze and
//! the same search trace on every platform. The dataset pipeline lives in the
//! sibling `maze-dataset` crate.

pub mod codec;
pub mod generators;
pub mod grid;
pub mod rng;
pub mod solver;

pub use crate::codec::{CodecError, decode, encode};
pub use crate::generators::{GeneratorError, GeneratorKind, GeneratorParams};
pub use crate::grid::{Grid, MazeSpec, PASSAGE, Point, WALL};
pub use crate::rng::Lcg;
pub use crate::solver::{
    EventKind, ReasoningEvent, SearchTrace, SolverKind, manhattan, solve_astar,
};
