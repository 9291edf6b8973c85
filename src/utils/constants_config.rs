use crate::utils::{math_helpers::{magnitude, vec_scale, vec_sub}, DEFAULT_GRAVITY_CONSTANTS};

/// Physical constants shared by every force evaluation in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityConstants {
    /// Gravitational constant.
    pub g: f64,
    /// Softening floor applied to every separation.
    pub rlimit: f64,
}

impl Default for GravityConstants {
    fn default() -> Self {
        DEFAULT_GRAVITY_CONSTANTS
    }
}

impl GravityConstants {
    /// Builds a set of constants, falling back to the defaults for any `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::utils::{GravityConstants, G};
    ///
    /// let constants = GravityConstants::new(None, Some(0.01));
    /// assert_eq!(constants.g, G);
    /// assert_eq!(constants.rlimit, 0.01);
    /// ```
    pub fn new(g: Option<f64>, rlimit: Option<f64>) -> Self {
        let default = DEFAULT_GRAVITY_CONSTANTS;
        Self {
            g: g.unwrap_or(default.g),
            rlimit: rlimit.unwrap_or(default.rlimit),
        }
    }

    /// Clamps a separation to the softening floor.
    pub fn softened_distance(&self, distance: f64) -> f64 {
        distance.max(self.rlimit)
    }

    /// Force exerted on a body of `target_mass` at `target` by `source_mass` at `source`.
    ///
    /// Computes `G * m1 * m2 * d / r³` with `r` clamped to `rlimit`. Coincident
    /// positions give a zero displacement and therefore a zero force.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::utils::GravityConstants;
    ///
    /// let constants = GravityConstants::new(Some(1.0), Some(0.0));
    /// let (fx, fy) = constants.calculate_pair_force((0.0, 0.0), 2.0, (2.0, 0.0), 3.0);
    /// assert!((fx - 1.5).abs() < 1e-12);
    /// assert_eq!(fy, 0.0);
    /// ```
    pub fn calculate_pair_force(
        &self,
        target: (f64, f64),
        target_mass: f64,
        source: (f64, f64),
        source_mass: f64,
    ) -> (f64, f64) {
        let d = vec_sub(source, target);
        let distance = self.softened_distance(magnitude(d));
        if distance == 0.0 {
            return (0.0, 0.0);
        }
        let scale = self.g * target_mass * source_mass / (distance * distance * distance);
        vec_scale(d, scale)
    }

    /// Softened potential energy of a pair, `-G * m1 * m2 / max(r, rlimit)`.
    pub fn calculate_pair_potential(
        &self,
        a: (f64, f64),
        a_mass: f64,
        b: (f64, f64),
        b_mass: f64,
    ) -> f64 {
        let distance = self.softened_distance(magnitude(vec_sub(b, a)));
        if distance == 0.0 {
            return 0.0;
        }
        -self.g * a_mass * b_mass / distance
    }
}
