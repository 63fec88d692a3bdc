//! Dataset pipeline for maze A* search traces.
//!
//! The crate pairs the deterministic algorithms in `maze-core` with a
//! parallel producer/worker pipeline that emits one JSON example per line.
//! Generation is sequential and owns the PRNG; solving and serialization fan
//! out across worker threads; the consumer drains finished batches in strict
//! example-index order, so the output stream is byte-identical regardless of
//! batch size or worker count.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod serialize;
pub mod sink;

pub use crate::config::{PipelineOptions, Split};
pub use crate::error::PipelineError;
pub use crate::pipeline::{RunSummary, generate_dataset};
pub use crate::serialize::example_line;
pub use crate::sink::open_sink;
