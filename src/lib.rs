//! Barnes-Hut gravitational n-body simulation in two dimensions.
//!
//! A run advances a fixed set of [`bodies::Body`] records through discrete time steps.
//! Each step builds a fresh [`tree::QuadTree`] over the domain, evaluates the force on
//! every active body with the [`forces`] walker, and advances positions with the
//! [`integrator`]. The [`distribution`] layer splits force evaluation across workers;
//! the [`simulation`] coordinator ties it together.
pub mod utils;
pub mod bodies;
pub mod tree;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod distribution;
pub mod diagnostics;
pub mod scenario;
#[cfg(feature = "io")]
pub mod io;

/// ### General helper function
/// - Asserts that two 2D vectors are approximately equal, component by component.
///
/// ### Arguments
///
/// * `a` - The first vector.
/// * `b` - The second vector.
/// * `epsilon` - The maximum difference per component for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_vec_eq(a: (f64, f64), b: (f64, f64), epsilon: f64, optional_message: Option<&str>) {
    let close = (a.0 - b.0).abs() < epsilon && (a.1 - b.1).abs() < epsilon;
    match optional_message {
        Some(message) => assert!(close, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!(close, "Expected {:?} to be approximately equal to {:?} (epsilon: {})", a, b, epsilon),
    }
}
