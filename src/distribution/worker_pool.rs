//! Splits per-step force evaluation across a fixed number of workers.
//!
//! Each step the coordinator lends the current body slice to every worker. Each
//! worker builds its own copy of the tree from that slice, which is cheaper than
//! shipping a linked structure around, and evaluates forces only for its own
//! contiguous partition of body indices. The coordinator then gathers the partial
//! force buffers in partition order. Nothing from step `k + 1` starts until every
//! worker has returned its partition for step `k`.
//!
//! With one worker everything runs on the calling thread. With more, workers are
//! threads of a dedicated Rayon pool sized to the worker count.
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bodies::Body;
use crate::forces::{compute_forces, TraversalStats};
use crate::tree::{QuadTree, Region};
use crate::utils::{GravityConstants, SimulationError};

/// Splits `0..len` into `workers` contiguous ranges.
///
/// Sizes differ by at most one; the first `len % workers` ranges get the extra index.
///
/// # Examples
///
/// ```
/// use rs_nbody::distribution::partition_ranges;
///
/// assert_eq!(partition_ranges(10, 4), vec![0..3, 3..6, 6..8, 8..10]);
/// assert_eq!(partition_ranges(2, 3), vec![0..1, 1..2, 2..2]);
/// ```
pub fn partition_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let base = len / workers;
    let remainder = len % workers;
    let mut start = 0;
    (0..workers)
        .map(|rank| {
            let size = base + usize::from(rank < remainder);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Forces for one step, gathered from every worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceEvaluation {
    /// One force per body, parallel to the body slice. Escaped bodies get `(0, 0)`.
    pub forces: Vec<(f64, f64)>,
    pub stats: TraversalStats,
    /// Node count of the tree each worker built.
    pub tree_nodes: usize,
}

/// One worker's share of a step.
struct PartialForces {
    forces: Vec<(f64, f64)>,
    stats: TraversalStats,
    tree_nodes: usize,
}

fn evaluate_partition(
    bodies: &[Body],
    range: Range<usize>,
    domain: Region,
    theta: f64,
    constants: &GravityConstants,
) -> Result<PartialForces, SimulationError> {
    let tree = QuadTree::build(bodies, domain)?;
    let (forces, stats) = compute_forces(&tree, bodies, range, theta, constants);
    Ok(PartialForces {
        forces,
        stats,
        tree_nodes: tree.len(),
    })
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// A fixed group of workers that evaluate forces in lock step.
pub struct WorkerPool {
    workers: usize,
    pool: Option<ThreadPool>,
    /// Partition whose worker panics instead of evaluating.
    #[cfg(test)]
    fail_partition: Option<usize>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool").field("workers", &self.workers).finish()
    }
}

impl WorkerPool {
    /// Creates a pool of `workers` workers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWorkerCount` for zero workers and `WorkerFailure` if the
    /// worker threads cannot be started.
    pub fn new(workers: usize) -> Result<Self, SimulationError> {
        if workers == 0 {
            return Err(SimulationError::InvalidWorkerCount);
        }
        let pool = if workers == 1 {
            None
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|rank| format!("nbody-worker-{}", rank + 1))
                .build()
                .map_err(|e| SimulationError::WorkerFailure(e.to_string()))?;
            Some(pool)
        };
        Ok(WorkerPool {
            workers,
            pool,
            #[cfg(test)]
            fail_partition: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn fail_partition(mut self, rank: usize) -> Self {
        self.fail_partition = Some(rank);
        self
    }

    fn run_partition(
        &self,
        rank: usize,
        bodies: &[Body],
        range: Range<usize>,
        domain: Region,
        theta: f64,
        constants: &GravityConstants,
    ) -> Result<PartialForces, SimulationError> {
        #[cfg(test)]
        if self.fail_partition == Some(rank) {
            panic!("partition {} failed", rank);
        }
        debug_assert!(rank < self.workers);
        evaluate_partition(bodies, range, domain, theta, constants)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Evaluates the force on every body in `bodies` for one step.
    ///
    /// # Errors
    ///
    /// Any tree build error from a worker aborts the step. A worker that panics is
    /// reported as `WorkerFailure` and no forces are returned.
    pub fn evaluate_forces(
        &self,
        bodies: &[Body],
        domain: Region,
        theta: f64,
        constants: &GravityConstants,
    ) -> Result<ForceEvaluation, SimulationError> {
        let ranges = partition_ranges(bodies.len(), self.workers);

        let gathered = panic::catch_unwind(AssertUnwindSafe(|| match &self.pool {
            None => ranges
                .into_iter()
                .enumerate()
                .map(|(rank, range)| self.run_partition(rank, bodies, range, domain, theta, constants))
                .collect::<Result<Vec<_>, _>>(),
            Some(pool) => pool.install(|| {
                ranges
                    .into_par_iter()
                    .enumerate()
                    .map(|(rank, range)| self.run_partition(rank, bodies, range, domain, theta, constants))
                    .collect::<Result<Vec<_>, _>>()
            }),
        }));
        let partials = match gathered {
            Ok(result) => result?,
            Err(payload) => {
                let message = panic_message(payload);
                error!("Worker failed during force evaluation: {}", message);
                return Err(SimulationError::WorkerFailure(message));
            }
        };

        let mut evaluation = ForceEvaluation {
            forces: Vec::with_capacity(bodies.len()),
            stats: TraversalStats::default(),
            tree_nodes: 0,
        };
        for partial in partials {
            evaluation.forces.extend(partial.forces);
            evaluation.stats += partial.stats;
            evaluation.tree_nodes = partial.tree_nodes;
        }
        debug!(
            "Gathered {} forces from {} workers ({} nodes visited)",
            evaluation.forces.len(),
            self.workers,
            evaluation.stats.nodes_visited
        );
        Ok(evaluation)
    }
}
