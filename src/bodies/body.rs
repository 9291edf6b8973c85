use crate::utils::{SimulationError, ESCAPED_MASS};

/// Whether a body still takes part in the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Active,
    /// The body left the domain; it keeps its last position and velocity
    /// but is never inserted into a tree or given a force again.
    Escaped,
}

/// A point mass in the simulation.
///
/// Forces are not stored on the body. Each step evaluates them into a
/// separate buffer parallel to the body slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Identity carried through from the input file.
    pub id: usize,
    /// Position represented as (x, y).
    pub position: (f64, f64),
    /// Velocity represented as (vx, vy).
    pub velocity: (f64, f64),
    /// Mass of the body; `ESCAPED_MASS` once it has escaped.
    pub mass: f64,
    pub state: BodyState,
}

impl Body {
    /// Creates a new active body.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidMass` if `mass` is not strictly positive and finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::bodies::Body;
    ///
    /// let body = Body::new(0, (1.0, 2.0), (0.0, 0.0), 1.5).expect("valid body");
    /// assert!(body.is_active());
    /// assert!(Body::new(1, (1.0, 2.0), (0.0, 0.0), 0.0).is_err());
    /// ```
    pub fn new(
        id: usize,
        position: (f64, f64),
        velocity: (f64, f64),
        mass: f64,
    ) -> Result<Self, SimulationError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::InvalidMass { id, mass });
        }
        Ok(Body {
            id,
            position,
            velocity,
            mass,
            state: BodyState::Active,
        })
    }

    pub fn is_active(&self) -> bool {
        self.state == BodyState::Active && self.mass >= 0.0
    }

    pub fn is_escaped(&self) -> bool {
        !self.is_active()
    }

    /// Marks the body as escaped and writes the negative mass sentinel.
    ///
    /// Calling this on an already escaped body changes nothing.
    pub fn mark_escaped(&mut self) {
        self.state = BodyState::Escaped;
        self.mass = ESCAPED_MASS;
    }
}
