//! Fatal pipeline failures, grouped by origin.

use maze_core::{CodecError, GeneratorError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Rejected before any generation starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A generator could not satisfy its contract.
    #[error("generator '{name}' failed while producing examples {start}..{end}: {source}")]
    Generator {
        name: &'static str,
        start: usize,
        end: usize,
        #[source]
        source: GeneratorError,
    },

    /// The solver found no plan for a maze the pipeline expected to be
    /// solvable. This points at an upstream bug or a disconnected maze, not
    /// at data loss.
    #[error("no plan found for example {index} (start ({start_x}, {start_y}), goal ({goal_x}, {goal_y}))")]
    Unsolvable {
        index: usize,
        start_x: u32,
        start_y: u32,
        goal_x: u32,
        goal_y: u32,
    },

    /// A worker or channel failed.
    #[error("pipeline transport failed: {0}")]
    Transport(String),

    /// The output sink rejected a write.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CodecError> for PipelineError {
    fn from(err: CodecError) -> Self {
        Self::Transport(err.to_string())
    }
}
