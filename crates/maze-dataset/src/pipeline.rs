//! Producer/worker/consumer orchestration with ordered emission.
//!
//! One producer thread owns the PRNG and generates mazes sequentially, so
//! the global draw order matches a single-threaded run. Encoded specs move
//! by value to a pool of solver workers that decode, solve, and serialize a
//! batch at a time. The consumer drains finished batches in strict
//! `batch.start` order; out-of-order completion is buffered and never
//! observable downstream.
//!
//! Backpressure is credit-based: the producer takes one credit per batch and
//! the dispatcher returns one each time it hands a batch to a worker, so at
//! most `producer_buffer` batches sit between generation and solving. When
//! the dispatcher holds an idle worker but the pending queue is empty,
//! generation is the bottleneck and the batch size doubles (after a short
//! warm-up, and never past `max_batch_size`).

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use maze_core::{Lcg, SolverKind, codec};

use crate::config::PipelineOptions;
use crate::error::PipelineError;
use crate::serialize;

/// Summary of a completed generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Examples written to the sink.
    pub examples: usize,
    /// Batches the consumer yielded.
    pub batches: usize,
    /// Worker threads the run used.
    pub workers: usize,
}

/// One encoded maze with its global example index.
struct BatchItem {
    idx: usize,
    spec: Vec<u8>,
}

/// Contiguous run of example indices handed to one worker.
struct Batch {
    start: usize,
    items: Vec<BatchItem>,
}

/// Fully serialized batch, keyed for ordered drain.
#[derive(Debug)]
struct SolvedBatch {
    start: usize,
    end: usize,
    lines: String,
}

/// Generate `opts.count` examples into `sink`, one JSON line each.
pub fn generate_dataset(
    opts: &PipelineOptions,
    sink: &mut dyn Write,
) -> Result<RunSummary, PipelineError> {
    opts.validate()?;
    let workers = opts.resolve_workers();
    let count = opts.count;
    if count == 0 {
        return Ok(RunSummary {
            examples: 0,
            batches: 0,
            workers,
        });
    }
    info!(
        "Generating {count} {} example(s) with '{}' ({} worker(s), batch size {})",
        opts.split,
        opts.generator.name(),
        workers,
        opts.batch_size
    );

    let batch_size = AtomicUsize::new(opts.batch_size);
    let max_batch_size = opts.max_batch_size;
    let warmup = workers + 1;

    thread::scope(|scope| {
        let (batch_tx, batch_rx) = bounded::<Result<Batch, PipelineError>>(opts.producer_buffer);
        let (credit_tx, credit_rx) = bounded::<()>(opts.producer_buffer);
        for _ in 0..opts.producer_buffer {
            let _ = credit_tx.send(());
        }
        let (idle_tx, idle_rx) = bounded::<usize>(workers);
        let (result_tx, result_rx) = bounded::<Result<SolvedBatch, PipelineError>>(workers + 1);

        let mut job_senders = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let (job_tx, job_rx) = bounded::<Batch>(1);
            job_senders.push(job_tx);
            let results = result_tx.clone();
            let idle = idle_tx.clone();
            let solver = opts.solver;
            let _ = scope.spawn(move || run_worker(worker_id, solver, &job_rx, &idle, &results));
        }
        let dispatcher_results = result_tx;
        drop(idle_tx);

        // Producer: the only thread that touches the PRNG.
        {
            let batch_size = &batch_size;
            let _ = scope.spawn(move || {
                let mut rng = Lcg::new(opts.effective_seed());
                let mut next_idx = 0usize;
                while next_idx < count {
                    if credit_rx.recv().is_err() {
                        return;
                    }
                    let size = batch_size.load(Ordering::Relaxed).max(1);
                    let end = (next_idx + size).min(count);
                    let mut items = Vec::with_capacity(end - next_idx);
                    for idx in next_idx..end {
                        match opts
                            .generator
                            .generate(opts.rows, opts.cols, &mut rng, &opts.params)
                        {
                            Ok(spec) => items.push(BatchItem {
                                idx,
                                spec: codec::encode(&spec),
                            }),
                            Err(err) => {
                                let _ = batch_tx.send(Err(PipelineError::Generator {
                                    name: opts.generator.name(),
                                    start: next_idx,
                                    end,
                                    source: err,
                                }));
                                return;
                            }
                        }
                    }
                    if batch_tx
                        .send(Ok(Batch {
                            start: next_idx,
                            items,
                        }))
                        .is_err()
                    {
                        return;
                    }
                    next_idx = end;
                }
            });
        }

        // Dispatcher: pairs generated batches with idle workers and returns
        // a credit per dispatch.
        {
            let batch_size = &batch_size;
            let _ = scope.spawn(move || {
                let mut dispatched = 0usize;
                loop {
                    let Ok(worker) = idle_rx.recv() else {
                        break;
                    };
                    let batch = match batch_rx.try_recv() {
                        Ok(batch) => batch,
                        Err(TryRecvError::Empty) => {
                            if dispatched >= warmup {
                                let current = batch_size.load(Ordering::Relaxed);
                                if current < max_batch_size {
                                    let next = (current * 2).min(max_batch_size);
                                    batch_size.store(next, Ordering::Relaxed);
                                    debug!(
                                        "generation is the bottleneck; batch size {current} -> {next}"
                                    );
                                }
                            }
                            match batch_rx.recv() {
                                Ok(batch) => batch,
                                Err(_) => break,
                            }
                        }
                        Err(TryRecvError::Disconnected) => break,
                    };
                    match batch {
                        Ok(batch) => {
                            if job_senders[worker].send(batch).is_err() {
                                break;
                            }
                            let _ = credit_tx.send(());
                            dispatched += 1;
                        }
                        Err(err) => {
                            let _ = dispatcher_results.send(Err(err));
                            break;
                        }
                    }
                }
            });
        }

        // Consumer: yield batches in example-index order.
        let progress = ProgressBar::new(count as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {wide_bar} {pos}/{len}")
                .expect("static template parses")
                .progress_chars("=> "),
        );
        let mut pending: BTreeMap<usize, SolvedBatch> = BTreeMap::new();
        let mut next_idx = 0usize;
        let mut batches = 0usize;
        while next_idx < count {
            if let Some(batch) = pending.remove(&next_idx) {
                sink.write_all(batch.lines.as_bytes())?;
                progress.inc((batch.end - batch.start) as u64);
                next_idx = batch.end;
                batches += 1;
                continue;
            }
            match result_rx.recv() {
                Ok(Ok(batch)) => {
                    let _ = pending.insert(batch.start, batch);
                }
                Ok(Err(err)) => return Err(err),
                Err(_) => {
                    return Err(PipelineError::Transport(
                        "workers exited before the run completed".into(),
                    ));
                }
            }
        }
        progress.finish_and_clear();
        Ok(RunSummary {
            examples: count,
            batches,
            workers,
        })
    })
}

/// Worker loop: announce idleness, then decode/solve/serialize one batch at
/// a time until the job channel closes or a send fails.
fn run_worker(
    worker_id: usize,
    solver: SolverKind,
    jobs: &Receiver<Batch>,
    idle: &Sender<usize>,
    results: &Sender<Result<SolvedBatch, PipelineError>>,
) {
    if idle.send(worker_id).is_err() {
        return;
    }
    while let Ok(batch) = jobs.recv() {
        let outcome = solve_batch(solver, &batch);
        let failed = outcome.is_err();
        if results.send(outcome).is_err() || failed {
            return;
        }
        if idle.send(worker_id).is_err() {
            return;
        }
    }
}

fn solve_batch(solver: SolverKind, batch: &Batch) -> Result<SolvedBatch, PipelineError> {
    let mut lines = String::new();
    for item in &batch.items {
        let spec = codec::decode(&item.spec)?;
        let trace = solver.solve(&spec.grid, spec.start, spec.goal);
        let Some(plan) = trace.plan else {
            return Err(PipelineError::Unsolvable {
                index: item.idx,
                start_x: spec.start.x,
                start_y: spec.start.y,
                goal_x: spec.goal.x,
                goal_y: spec.goal.y,
            });
        };
        lines.push_str(&serialize::example_line(&spec, &trace.events, &plan));
    }
    Ok(SolvedBatch {
        start: batch.start,
        end: batch.start + batch.items.len(),
        lines,
    })
}
