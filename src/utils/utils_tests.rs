use approx::assert_relative_eq;
use crate::utils::{magnitude, vec_add, vec_scale, vec_sub, weighted_average, GravityConstants, SimulationError, G, RLIMIT};

#[test]
fn test_default_constants() {
    let constants = GravityConstants::default();
    assert_eq!(constants.g, G);
    assert_eq!(constants.rlimit, RLIMIT);
}

#[test]
fn test_vector_helpers() {
    assert_eq!(vec_add((1.0, 2.0), (3.0, 4.0)), (4.0, 6.0));
    assert_eq!(vec_sub((1.0, 2.0), (3.0, 4.0)), (-2.0, -2.0));
    assert_eq!(vec_scale((1.0, -2.0), 3.0), (3.0, -6.0));
    assert_relative_eq!(magnitude((3.0, 4.0)), 5.0);
}

#[test]
fn test_weighted_average_is_running_centroid() {
    // Folding three bodies one at a time must match the direct centroid.
    let bodies = [((1.0, 1.0), 2.0), ((3.0, 1.0), 1.0), ((2.0, 4.0), 3.0)];
    let mut com = (0.0, 0.0);
    let mut mass = 0.0;
    for &(position, m) in &bodies {
        com = weighted_average(com, mass, position, m);
        mass += m;
    }
    assert_relative_eq!(com.0, (2.0 + 3.0 + 6.0) / 6.0, epsilon = 1e-12);
    assert_relative_eq!(com.1, (2.0 + 1.0 + 12.0) / 6.0, epsilon = 1e-12);
}

#[test]
fn test_pair_force_is_softened() {
    let constants = GravityConstants::default();
    // Closer than RLIMIT: the magnitude is computed as if the bodies were RLIMIT apart,
    // but the direction still follows the true displacement.
    let (fx, fy) = constants.calculate_pair_force((1.0, 1.0), 1.0, (1.01, 1.0), 1.0);
    let expected = G * 0.01 / (RLIMIT * RLIMIT * RLIMIT);
    assert_relative_eq!(fx, expected, epsilon = 1e-15);
    assert_eq!(fy, 0.0);
}

#[test]
fn test_pair_force_coincident_is_zero() {
    let constants = GravityConstants::default();
    assert_eq!(constants.calculate_pair_force((2.0, 2.0), 5.0, (2.0, 2.0), 5.0), (0.0, 0.0));
}

#[test]
fn test_pair_forces_are_opposite() {
    let constants = GravityConstants::default();
    let ab = constants.calculate_pair_force((0.5, 0.5), 2.0, (1.5, 2.0), 3.0);
    let ba = constants.calculate_pair_force((1.5, 2.0), 3.0, (0.5, 0.5), 2.0);
    assert_relative_eq!(ab.0, -ba.0, epsilon = 1e-18);
    assert_relative_eq!(ab.1, -ba.1, epsilon = 1e-18);
}

#[test]
fn test_pair_potential() {
    let constants = GravityConstants::new(Some(1.0), None);
    assert_relative_eq!(constants.calculate_pair_potential((0.0, 0.0), 2.0, (0.0, 4.0), 2.0), -1.0);
}

#[test]
fn test_error_display() {
    let err = SimulationError::StructuralInsertion { id: 7 };
    assert!(err.to_string().contains("#7"));
    let io: SimulationError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io, SimulationError::Io(_)));
}
