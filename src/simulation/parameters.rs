use crate::tree::Region;
use crate::utils::{GravityConstants, SimulationError, DEFAULT_DOMAIN_SIZE};

/// Run-wide settings handed to the step coordinator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Number of steps to advance. Must be positive.
    pub step_count: usize,
    /// MAC threshold. `0` disables approximation.
    pub theta: f64,
    /// Time step.
    pub dt: f64,
    /// Side length of the square domain anchored at the origin.
    pub domain_size: f64,
    /// Number of workers sharing force evaluation. `1` runs sequentially.
    pub workers: usize,
    pub constants: GravityConstants,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            step_count: 1,
            theta: 0.5,
            dt: 0.005,
            domain_size: DEFAULT_DOMAIN_SIZE,
            workers: 1,
            constants: GravityConstants::default(),
        }
    }
}

impl SimulationParameters {
    /// Checks every field against its allowed range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::simulation::SimulationParameters;
    /// use rs_nbody::utils::SimulationError;
    ///
    /// assert!(SimulationParameters::default().validate().is_ok());
    ///
    /// let params = SimulationParameters { dt: 0.0, ..Default::default() };
    /// assert_eq!(params.validate(), Err(SimulationError::InvalidTimeStep(0.0)));
    /// ```
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.step_count == 0 {
            return Err(SimulationError::InvalidStepCount);
        }
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(SimulationError::InvalidTheta(self.theta));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimulationError::InvalidTimeStep(self.dt));
        }
        if !self.domain_size.is_finite() || self.domain_size <= 0.0 {
            return Err(SimulationError::InvalidDomainSize(self.domain_size));
        }
        if self.workers == 0 {
            return Err(SimulationError::InvalidWorkerCount);
        }
        Ok(())
    }

    /// The global domain `[0, domain_size)²` every tree is built over.
    pub fn domain(&self) -> Region {
        Region::domain(self.domain_size)
    }
}
