use crate::bodies::{Body, BodyState};
use crate::utils::{SimulationError, ESCAPED_MASS};

#[test]
fn test_new_valid() {
    let body = Body::new(3, (1.0, 2.0), (0.1, -0.1), 2.0).expect("Failed to create body with valid parameters");
    assert_eq!(body.id, 3);
    assert_eq!(body.state, BodyState::Active);
    assert!(body.is_active());
    assert!(!body.is_escaped());
}

#[test]
fn test_new_invalid_mass() {
    for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = Body::new(9, (0.0, 0.0), (0.0, 0.0), mass);
        match result {
            Err(SimulationError::InvalidMass { id, .. }) => assert_eq!(id, 9),
            other => panic!("Unexpected result for mass {}: {:?}", mass, other),
        }
    }
}

#[test]
fn test_mark_escaped_is_idempotent() {
    let mut body = Body::new(0, (1.0, 1.0), (2.0, 0.0), 1.0).unwrap();
    body.mark_escaped();
    assert!(body.is_escaped());
    assert_eq!(body.mass, ESCAPED_MASS);
    let snapshot = body;
    body.mark_escaped();
    assert_eq!(body, snapshot);
}

#[test]
fn test_negative_mass_reads_as_escaped() {
    let mut body = Body::new(0, (1.0, 1.0), (0.0, 0.0), 1.0).unwrap();
    body.mass = ESCAPED_MASS;
    assert!(body.is_escaped());
}
