//! Run configuration and validation.

use std::fmt;
use std::str::FromStr;

use maze_core::{GeneratorKind, GeneratorParams, SolverKind};

use crate::error::PipelineError;

/// Initial number of examples per batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;
/// Ceiling for dynamic batch growth.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 2000;
/// Batches the producer may run ahead of the dispatcher.
pub const DEFAULT_PRODUCER_BUFFER: usize = 9;

/// Dataset split; contributes the parity bit to the effective seed so train
/// and test streams never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn parity(self) -> u64 {
        match self {
            Split::Train => 0,
            Split::Test => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(format!("unknown mode '{other}' (expected train or test)")),
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for one dataset generation run. All fields are fixed for the
/// lifetime of the run; only the in-flight batch size may grow beyond
/// `batch_size`, and never past `max_batch_size`.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub generator: GeneratorKind,
    pub solver: SolverKind,
    pub rows: u32,
    pub cols: u32,
    pub split: Split,
    pub seed: u64,
    pub count: usize,
    pub batch_size: usize,
    pub max_batch_size: usize,
    pub producer_buffer: usize,
    /// Worker-count override; `None` resolves from the CPU count.
    pub workers: Option<usize>,
    pub params: GeneratorParams,
}

impl PipelineOptions {
    /// Options with the documented defaults: 30x30 train grid, seed 42, one
    /// example.
    pub fn new(generator: GeneratorKind, solver: SolverKind) -> Self {
        Self {
            generator,
            solver,
            rows: 30,
            cols: 30,
            split: Split::Train,
            seed: 42,
            count: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            producer_buffer: DEFAULT_PRODUCER_BUFFER,
            workers: None,
            params: GeneratorParams::default(),
        }
    }

    /// Effective PRNG seed: `seed * 2` plus the split parity, masked to 32
    /// bits by the generator.
    pub fn effective_seed(&self) -> u64 {
        self.seed.wrapping_mul(2).wrapping_add(self.split.parity())
    }

    /// Everything that must hold before any generation starts.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let fail = |msg: String| Err(PipelineError::Config(msg));
        if self.rows == 0 || self.cols == 0 {
            return fail("rows and cols must be positive".into());
        }
        if self.rows == 1 && self.cols == 1 {
            return fail("a 1x1 grid cannot hold distinct start and goal cells".into());
        }
        if self.batch_size == 0 {
            return fail("batch size must be positive".into());
        }
        if self.max_batch_size < self.batch_size {
            return fail(format!(
                "max batch size {} is below the initial batch size {}",
                self.max_batch_size, self.batch_size
            ));
        }
        if self.producer_buffer == 0 {
            return fail("producer buffer must be positive".into());
        }
        if self.workers == Some(0) {
            return fail("workers must be positive".into());
        }
        let p = &self.params;
        if !(p.coverage > 0.0 && p.coverage <= 1.0) {
            return fail(format!("coverage {} must lie in (0, 1]", p.coverage));
        }
        if !(0.0..=1.0).contains(&p.fill_probability) {
            return fail(format!(
                "fillProbability {} must lie in [0, 1]",
                p.fill_probability
            ));
        }
        if p.survival_threshold > 8 {
            return fail(format!(
                "survivalThreshold {} must lie in 0..=8",
                p.survival_threshold
            ));
        }
        if p.birth_threshold > 8 {
            return fail(format!(
                "birthThreshold {} must lie in 0..=8",
                p.birth_threshold
            ));
        }
        Ok(())
    }

    /// Resolve the worker pool size: the requested count (default: CPUs
    /// minus two), never more than `count`, never less than one, and capped
    /// at two for runs too small to amortize a wider pool.
    pub fn resolve_workers(&self) -> usize {
        let requested = self
            .workers
            .unwrap_or_else(|| num_cpus::get().saturating_sub(2));
        let mut workers = requested.min(self.count).max(1);
        if self.count < 100 {
            workers = workers.min(2);
        }
        workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PipelineOptions {
        PipelineOptions::new(GeneratorKind::Dfs, SolverKind::AStar)
    }

    #[test]
    fn effective_seed_folds_in_split_parity() {
        let mut opts = options();
        opts.seed = 7;
        assert_eq!(opts.effective_seed(), 14);
        opts.split = Split::Test;
        assert_eq!(opts.effective_seed(), 15);
    }

    #[test]
    fn one_by_one_grids_are_rejected() {
        let mut opts = options();
        opts.rows = 1;
        opts.cols = 1;
        assert!(matches!(opts.validate(), Err(PipelineError::Config(_))));
        opts.cols = 2;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn parameter_ranges_are_enforced() {
        let mut opts = options();
        opts.params.coverage = 0.0;
        assert!(opts.validate().is_err());
        opts.params.coverage = 1.0;
        assert!(opts.validate().is_ok());
        opts.params.fill_probability = 1.5;
        assert!(opts.validate().is_err());
        opts.params.fill_probability = 0.45;
        opts.params.survival_threshold = 9;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn worker_resolution_honors_caps() {
        let mut opts = options();
        opts.workers = Some(8);
        opts.count = 1000;
        assert_eq!(opts.resolve_workers(), 8);
        opts.count = 50;
        assert_eq!(opts.resolve_workers(), 2, "small runs cap at two workers");
        opts.count = 3;
        opts.workers = Some(1);
        assert_eq!(opts.resolve_workers(), 1);
        opts.workers = Some(16);
        assert_eq!(opts.resolve_workers(), 2);
        opts.count = 200;
        opts.workers = Some(500);
        assert_eq!(opts.resolve_workers(), 200, "never more workers than examples");
    }

    #[test]
    fn split_parses_both_names() {
        assert_eq!("train".parse::<Split>(), Ok(Split::Train));
        assert_eq!("test".parse::<Split>(), Ok(Split::Test));
        assert!("validation".parse::<Split>().is_err());
    }
}
