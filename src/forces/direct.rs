use crate::bodies::Body;
use crate::utils::{vec_add, GravityConstants};

/// Exact O(n) force on `bodies[index]` from every other active body.
///
/// Uses the same softening and self-exclusion as the tree walk, so it serves as
/// the reference a `theta = 0` tree evaluation must reproduce.
pub fn direct_force(bodies: &[Body], index: usize, constants: &GravityConstants) -> (f64, f64) {
    let target = &bodies[index];
    if !target.is_active() {
        return (0.0, 0.0);
    }
    bodies
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != index && other.is_active())
        .fold((0.0, 0.0), |acc, (_, other)| {
            vec_add(
                acc,
                constants.calculate_pair_force(target.position, target.mass, other.position, other.mass),
            )
        })
}

/// Exact O(n²) forces for every body.
pub fn direct_forces(bodies: &[Body], constants: &GravityConstants) -> Vec<(f64, f64)> {
    (0..bodies.len()).map(|i| direct_force(bodies, i, constants)).collect()
}
