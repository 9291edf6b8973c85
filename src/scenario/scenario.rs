//! Seeded initial conditions.
//!
//! Produces reproducible body sets for tests, benchmarks and the `nbody` binary's
//! `--generate` mode. The same seed always yields the same bodies.
//!
//! # Example
//!
//! ```
//! use rs_nbody::scenario::{random_bodies, ScenarioConfig};
//!
//! let a = random_bodies(100, 4.0, 42);
//! let b = ScenarioConfig { count: 100, domain_size: 4.0, seed: 42, ..Default::default() }.generate();
//! assert_eq!(a, b);
//! assert!(a.iter().all(|body| body.is_active()));
//! ```
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::bodies::{Body, BodyState};
use crate::utils::DEFAULT_DOMAIN_SIZE;

/// Parameters for a uniformly scattered body set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioConfig {
    pub count: usize,
    pub domain_size: f64,
    /// Fraction of the domain left empty along each edge.
    pub margin: f64,
    /// Masses are drawn from `[min, max)`.
    pub mass_range: (f64, f64),
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            count: 100,
            domain_size: DEFAULT_DOMAIN_SIZE,
            margin: 0.1,
            mass_range: (0.5, 1.5),
            max_speed: 0.05,
            seed: 0,
        }
    }
}

fn sample(rng: &mut StdRng, low: f64, high: f64) -> f64 {
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}

impl ScenarioConfig {
    /// Draws `count` active bodies with ids `0..count`.
    pub fn generate(&self) -> Vec<Body> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let low = self.domain_size * self.margin;
        let high = self.domain_size * (1.0 - self.margin);
        (0..self.count)
            .map(|id| {
                let position = (sample(&mut rng, low, high), sample(&mut rng, low, high));
                let velocity = (
                    sample(&mut rng, -self.max_speed, self.max_speed),
                    sample(&mut rng, -self.max_speed, self.max_speed),
                );
                let mass = sample(&mut rng, self.mass_range.0, self.mass_range.1);
                Body {
                    id,
                    position,
                    velocity,
                    mass,
                    state: BodyState::Active,
                }
            })
            .collect()
    }
}

/// Shorthand for `ScenarioConfig::generate` with default masses, speeds and margins.
pub fn random_bodies(count: usize, domain_size: f64, seed: u64) -> Vec<Body> {
    ScenarioConfig {
        count,
        domain_size,
        seed,
        ..Default::default()
    }
    .generate()
}
