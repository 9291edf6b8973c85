//! Conserved quantities used to judge integration quality.
//!
//! All sums run over active bodies only. Potential energy uses the same softened
//! separation as the force law so the two stay consistent.
use crate::bodies::Body;
use crate::utils::{magnitude_squared, vec_add, vec_scale, GravityConstants};

/// `Σ ½ m |v|²` over active bodies.
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .filter(|b| b.is_active())
        .map(|b| 0.5 * b.mass * magnitude_squared(b.velocity))
        .sum()
}

/// `-Σ_{i<j} G m_i m_j / max(r_ij, rlimit)` over active bodies.
pub fn potential_energy(bodies: &[Body], constants: &GravityConstants) -> f64 {
    let active: Vec<&Body> = bodies.iter().filter(|b| b.is_active()).collect();
    let mut energy = 0.0;
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            energy += constants.calculate_pair_potential(a.position, a.mass, b.position, b.mass);
        }
    }
    energy
}

pub fn total_energy(bodies: &[Body], constants: &GravityConstants) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, constants)
}

/// `Σ m v` over active bodies.
pub fn total_momentum(bodies: &[Body]) -> (f64, f64) {
    bodies
        .iter()
        .filter(|b| b.is_active())
        .fold((0.0, 0.0), |acc, b| vec_add(acc, vec_scale(b.velocity, b.mass)))
}

/// A snapshot of the conserved quantities of a body set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub potential: f64,
    pub momentum: (f64, f64),
    pub active: usize,
}

impl EnergyReport {
    pub fn measure(bodies: &[Body], constants: &GravityConstants) -> Self {
        EnergyReport {
            kinetic: kinetic_energy(bodies),
            potential: potential_energy(bodies, constants),
            momentum: total_momentum(bodies),
            active: bodies.iter().filter(|b| b.is_active()).count(),
        }
    }

    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }

    /// Relative change in total energy from `initial` to `self`.
    ///
    /// Falls back to the absolute change when the initial total is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::diagnostics::EnergyReport;
    ///
    /// let before = EnergyReport { kinetic: 2.0, potential: -4.0, momentum: (0.0, 0.0), active: 2 };
    /// let after = EnergyReport { kinetic: 2.5, potential: -4.0, momentum: (0.0, 0.0), active: 2 };
    /// assert_eq!(after.drift(&before), -0.25);
    /// ```
    pub fn drift(&self, initial: &EnergyReport) -> f64 {
        let e0 = initial.total();
        let delta = self.total() - e0;
        if e0 == 0.0 {
            delta
        } else {
            delta / e0
        }
    }
}
