//! The step coordinator.
//!
//! A [`Simulation`] owns the working body set for the whole run. Every step it hands
//! the set to its [`WorkerPool`] for force evaluation, waits for all partitions, then
//! integrates every body on the calling thread. Trees live only inside a step.
//!
//! # Example
//!
//! ```
//! use rs_nbody::bodies::Body;
//! use rs_nbody::simulation::{Simulation, SimulationParameters};
//!
//! let bodies = vec![
//!     Body::new(0, (1.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
//!     Body::new(1, (3.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
//! ];
//! let params = SimulationParameters { step_count: 10, ..Default::default() };
//!
//! let mut sim = Simulation::new(bodies, params).unwrap();
//! let summary = sim.run().unwrap();
//!
//! assert_eq!(summary.steps, 10);
//! // The pair drifts together.
//! let bodies = sim.bodies();
//! assert!(bodies[0].position.0 > 1.0);
//! assert!(bodies[1].position.0 < 3.0);
//! ```
use log::{debug, info, warn};

use crate::bodies::Body;
use crate::distribution::WorkerPool;
use crate::forces::TraversalStats;
use crate::integrator::{advance, IntegrationOutcome};
use crate::simulation::SimulationParameters;
use crate::utils::SimulationError;

/// What happened during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based step number.
    pub step: usize,
    /// Bodies still active after the step.
    pub active: usize,
    /// Bodies that escaped during this step.
    pub escaped: usize,
    pub tree_nodes: usize,
    pub stats: TraversalStats,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub active: usize,
    /// Bodies escaped at the end of the run, including any that started outside the domain.
    pub escaped: usize,
    pub stats: TraversalStats,
}

#[derive(Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    params: SimulationParameters,
    pool: WorkerPool,
    steps_completed: usize,
}

impl Simulation {
    /// Prepares a run over `bodies`.
    ///
    /// Active bodies that already lie outside the domain are marked escaped.
    ///
    /// # Errors
    ///
    /// Returns the first parameter that fails validation, `InvalidMass` for an active
    /// body whose mass is not strictly positive, or `WorkerFailure` if the pool cannot start.
    pub fn new(mut bodies: Vec<Body>, params: SimulationParameters) -> Result<Self, SimulationError> {
        params.validate()?;

        let domain = params.domain();
        for body in bodies.iter_mut().filter(|b| b.is_active()) {
            if !body.mass.is_finite() || body.mass <= 0.0 {
                return Err(SimulationError::InvalidMass {
                    id: body.id,
                    mass: body.mass,
                });
            }
            if !domain.contains(body.position) {
                warn!(
                    "Body #{} starts outside the domain at ({}, {})",
                    body.id, body.position.0, body.position.1
                );
                body.mark_escaped();
            }
        }

        let pool = WorkerPool::new(params.workers)?;
        Ok(Simulation {
            bodies,
            params,
            pool,
            steps_completed: 0,
        })
    }

    /// Advances every active body by one time step.
    ///
    /// # Errors
    ///
    /// Structural tree errors and worker failures abort the step before any body moves.
    pub fn step(&mut self) -> Result<StepReport, SimulationError> {
        let domain = self.params.domain();
        let evaluation =
            self.pool
                .evaluate_forces(&self.bodies, domain, self.params.theta, &self.params.constants)?;

        let mut escaped = 0;
        for (body, force) in self.bodies.iter_mut().zip(evaluation.forces) {
            if advance(body, force, self.params.dt, &domain) == IntegrationOutcome::Escaped {
                escaped += 1;
            }
        }
        self.steps_completed += 1;

        let report = StepReport {
            step: self.steps_completed,
            active: self.active_count(),
            escaped,
            tree_nodes: evaluation.tree_nodes,
            stats: evaluation.stats,
        };
        debug!(
            "Step {}: {} active bodies, {} tree nodes, {} escaped",
            report.step, report.active, report.tree_nodes, report.escaped
        );
        Ok(report)
    }

    /// Runs the remaining steps up to `step_count`.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        let remaining = self.params.step_count.saturating_sub(self.steps_completed);
        info!(
            "Running {} steps over {} bodies (theta = {}, dt = {}, workers = {})",
            remaining,
            self.bodies.len(),
            self.params.theta,
            self.params.dt,
            self.params.workers
        );

        let mut stats = TraversalStats::default();
        for _ in 0..remaining {
            stats += self.step()?.stats;
        }

        let summary = RunSummary {
            steps: self.steps_completed,
            active: self.active_count(),
            escaped: self.bodies.len() - self.active_count(),
            stats,
        };
        info!(
            "Finished after {} steps: {} active, {} escaped",
            summary.steps, summary.active, summary.escaped
        );
        Ok(summary)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    pub fn steps_completed(&self) -> usize {
        self.steps_completed
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn active_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_active()).count()
    }
}

/// Runs a full simulation and returns the final body set in input order.
pub fn simulate(bodies: Vec<Body>, params: SimulationParameters) -> Result<Vec<Body>, SimulationError> {
    let mut sim = Simulation::new(bodies, params)?;
    sim.run()?;
    Ok(sim.into_bodies())
}
