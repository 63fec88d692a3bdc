use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::Env;
use log::info;
use maze_core::{GeneratorKind, GeneratorParams, SolverKind};
use maze_dataset::config::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_BATCH_SIZE, DEFAULT_PRODUCER_BUFFER};
use maze_dataset::{PipelineOptions, Split, generate_dataset, open_sink};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Generate reproducible maze datasets paired with A* search traces"
)]
struct Cli {
    /// Maze generation algorithm (e.g. dfs, kruskal, wilson)
    #[arg(short = 'g', long)]
    generator: String,

    /// Search algorithm used to trace each maze
    #[arg(short = 's', long)]
    solver: String,

    /// Grid rows
    #[arg(short = 'r', long, default_value_t = 30)]
    rows: u32,

    /// Grid columns
    #[arg(short = 'c', long, default_value_t = 30)]
    cols: u32,

    /// Dataset split: train or test
    #[arg(short = 'm', long, default_value = "train")]
    mode: String,

    /// Base PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of examples to emit
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Initial number of examples per solver batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Ceiling for dynamic batch growth
    #[arg(long, default_value_t = DEFAULT_MAX_BATCH_SIZE)]
    max_batch_size: usize,

    /// Worker thread count (defaults to CPU count minus two)
    #[arg(long)]
    workers: Option<usize>,

    /// Output file path; stdout when omitted
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// drunkards_walk: fraction of all cells to carve, in (0, 1]
    #[arg(long)]
    coverage: Option<f64>,

    /// cellular_automata: probability that a cell starts as a wall
    #[arg(long = "fillProbability")]
    fill_probability: Option<f64>,

    /// cellular_automata: walls with fewer alive neighbors open up
    #[arg(long = "survivalThreshold")]
    survival_threshold: Option<u32>,

    /// cellular_automata: passages with more alive neighbors close
    #[arg(long = "birthThreshold")]
    birth_threshold: Option<u32>,

    /// cellular_automata: smoothing iterations
    #[arg(long)]
    iterations: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let Some(generator) = GeneratorKind::from_name(&cli.generator) else {
        bail!(
            "unknown generator '{}' (available: {})",
            cli.generator,
            GeneratorKind::names().join(", ")
        );
    };
    let Some(solver) = SolverKind::from_name(&cli.solver) else {
        bail!(
            "unknown solver '{}' (available: {})",
            cli.solver,
            SolverKind::names().join(", ")
        );
    };
    let split: Split = match cli.mode.parse() {
        Ok(split) => split,
        Err(message) => bail!(message),
    };

    let mut params = GeneratorParams::default();
    if let Some(coverage) = cli.coverage {
        params.coverage = coverage;
    }
    if let Some(fill_probability) = cli.fill_probability {
        params.fill_probability = fill_probability;
    }
    if let Some(survival_threshold) = cli.survival_threshold {
        params.survival_threshold = survival_threshold;
    }
    if let Some(birth_threshold) = cli.birth_threshold {
        params.birth_threshold = birth_threshold;
    }
    if let Some(iterations) = cli.iterations {
        params.iterations = iterations;
    }

    let opts = PipelineOptions {
        generator,
        solver,
        rows: cli.rows,
        cols: cli.cols,
        split,
        seed: cli.seed,
        count: cli.count,
        batch_size: cli.batch_size,
        max_batch_size: cli.max_batch_size,
        producer_buffer: DEFAULT_PRODUCER_BUFFER,
        workers: cli.workers,
        params,
    };

    let mut sink = open_sink(cli.output.as_deref()).context("failed to open output sink")?;
    let summary = generate_dataset(&opts, sink.as_mut())?;
    sink.flush().context("failed to flush output sink")?;

    info!(
        "Completed run: {} example(s) in {} batch(es) across {} worker(s)",
        summary.examples, summary.batches, summary.workers
    );
    Ok(())
}
