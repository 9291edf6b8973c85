use log::warn;

use crate::bodies::Body;
use crate::tree::Region;
use crate::utils::{vec_add, vec_scale};

/// What `advance` did to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationOutcome {
    /// Position and velocity were updated.
    Advanced,
    /// The new position fell outside the domain; the body is now escaped.
    Escaped,
    /// The body had already escaped and was left untouched.
    Skipped,
}

/// Advances `body` by one time step under the accumulated `force`.
///
/// Position is updated with `x' = x + v·dt + ½·a·dt²`. If `x'` leaves `domain` the
/// body keeps `x'` and its old velocity and is marked escaped; otherwise its velocity
/// becomes `v + a·dt`. Active bodies must have a positive mass.
///
/// # Examples
///
/// ```
/// use rs_nbody::bodies::Body;
/// use rs_nbody::integrator::{advance, IntegrationOutcome};
/// use rs_nbody::tree::Region;
///
/// let domain = Region::domain(4.0);
/// let mut body = Body::new(0, (1.0, 1.0), (1.0, 0.0), 2.0).unwrap();
///
/// let outcome = advance(&mut body, (4.0, 0.0), 0.5, &domain);
/// assert_eq!(outcome, IntegrationOutcome::Advanced);
/// // a = 2, x' = 1 + 0.5 + 0.5 * 2 * 0.25, v' = 1 + 2 * 0.5
/// assert_eq!(body.position, (1.75, 1.0));
/// assert_eq!(body.velocity, (2.0, 0.0));
/// ```
pub fn advance(body: &mut Body, force: (f64, f64), dt: f64, domain: &Region) -> IntegrationOutcome {
    if !body.is_active() {
        return IntegrationOutcome::Skipped;
    }
    debug_assert!(body.mass > 0.0, "active body #{} has non-positive mass", body.id);

    let acceleration = vec_scale(force, 1.0 / body.mass);
    let drift = vec_scale(body.velocity, dt);
    let kick = vec_scale(acceleration, 0.5 * dt * dt);
    body.position = vec_add(vec_add(body.position, drift), kick);

    if !domain.contains(body.position) {
        warn!(
            "Body #{} escaped the domain at ({}, {})",
            body.id, body.position.0, body.position.1
        );
        body.mark_escaped();
        return IntegrationOutcome::Escaped;
    }

    body.velocity = vec_add(body.velocity, vec_scale(acceleration, dt));
    IntegrationOutcome::Advanced
}
