use std::fs;

use crate::bodies::Body;
use crate::io::{read_bodies, read_bodies_from_path, write_bodies, write_bodies_to_path};
use crate::scenario::random_bodies;
use crate::utils::{SimulationError, ESCAPED_MASS};

fn read(text: &str) -> Result<Vec<Body>, SimulationError> {
    read_bodies(text.as_bytes())
}

fn parse_line(err: SimulationError) -> usize {
    match err {
        SimulationError::Parse { line, .. } => line,
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_reads_records_in_order() {
    let bodies = read("3\n2 0.5 0.5 1.0 0.0 0.0\n0 1.5 2.5 2.0 0.1 -0.1\n1 3.0 3.0 0.5 0.0 0.2\n").unwrap();
    assert_eq!(bodies.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 0, 1]);
    assert_eq!(bodies[1].position, (1.5, 2.5));
    assert_eq!(bodies[1].mass, 2.0);
    assert_eq!(bodies[1].velocity, (0.1, -0.1));
    assert!(bodies.iter().all(|b| b.is_active()));
}

#[test]
fn test_blank_lines_and_extra_spacing_are_ignored() {
    let bodies = read("\n  2  \n\n0   1 1 1 0 0\n\t1 2 2 1 0 0\n\n").unwrap();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[1].position, (2.0, 2.0));
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_line(read("").unwrap_err()), 1);
}

#[test]
fn test_zero_bodies() {
    assert!(read("0\n").unwrap().is_empty());
}

#[test]
fn test_bad_count() {
    assert_eq!(parse_line(read("two\n").unwrap_err()), 1);
    assert_eq!(parse_line(read("-1\n").unwrap_err()), 1);
}

#[test]
fn test_missing_record() {
    let err = read("3\n0 1 1 1 0 0\n1 2 2 1 0 0\n").unwrap_err();
    assert_eq!(parse_line(err), 4);
}

#[test]
fn test_trailing_record() {
    let err = read("1\n0 1 1 1 0 0\n1 2 2 1 0 0\n").unwrap_err();
    assert_eq!(parse_line(err), 3);
}

#[test]
fn test_malformed_records() {
    assert_eq!(parse_line(read("1\n0 1 1 1 0\n").unwrap_err()), 2);
    assert_eq!(parse_line(read("1\n0 1 x 1 0 0\n").unwrap_err()), 2);
    assert_eq!(parse_line(read("2\n0 1 1 1 0 0\n\n1.5 1 1 1 0 0\n").unwrap_err()), 4);
    assert_eq!(parse_line(read("1\n0 inf 1 1 0 0\n").unwrap_err()), 2);
}

#[test]
fn test_non_positive_mass_rejected() {
    assert_eq!(
        read("1\n7 1 1 0 0 0\n").unwrap_err(),
        SimulationError::InvalidMass { id: 7, mass: 0.0 }
    );
    assert_eq!(
        read("1\n3 1 1 -2 0 0\n").unwrap_err(),
        SimulationError::InvalidMass { id: 3, mass: -2.0 }
    );
}

#[test]
fn test_output_sorted_with_six_decimals() {
    let mut bodies = vec![
        Body::new(1, (3.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
        Body::new(0, (1.25, 2.0), (-0.5, 0.0), 2.0).unwrap(),
    ];
    bodies[0].position = (4.2, 2.0);
    bodies[0].mark_escaped();

    let mut out = Vec::new();
    write_bodies(&mut out, &bodies).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "2");
    assert_eq!(lines[1], "0 1.250000 2.000000 2.000000 -0.500000 0.000000");
    assert_eq!(lines[2], format!("1 4.200000 2.000000 {:.6} 0.000000 0.000000", ESCAPED_MASS));
}

#[test]
fn test_path_round_trip() {
    let dir = std::env::temp_dir().join(format!("rs_nbody_io_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bodies.txt");

    let bodies = random_bodies(15, 4.0, 99);
    write_bodies_to_path(&path, &bodies).unwrap();
    let back = read_bodies_from_path(&path).unwrap();

    assert_eq!(back.len(), bodies.len());
    for (a, b) in bodies.iter().zip(&back) {
        assert_eq!(a.id, b.id);
        assert!((a.position.0 - b.position.0).abs() <= 5e-7);
        assert!((a.position.1 - b.position.1).abs() <= 5e-7);
        assert!((a.mass - b.mass).abs() <= 5e-7);
        assert!((a.velocity.0 - b.velocity.0).abs() <= 5e-7);
    }
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_file_is_io_error() {
    let err = read_bodies_from_path("/nonexistent/rs_nbody/bodies.txt").unwrap_err();
    assert!(matches!(err, SimulationError::Io(_)));
}
