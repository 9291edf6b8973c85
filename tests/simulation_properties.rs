use rs_nbody::assert_vec_eq;
use rs_nbody::bodies::{Body, BodyState};
use rs_nbody::io::{read_bodies, write_bodies};
use rs_nbody::scenario::{random_bodies, ScenarioConfig};
use rs_nbody::simulation::{simulate, Simulation, SimulationParameters};
use rs_nbody::tree::{QuadTree, Region};
use rs_nbody::utils::ESCAPED_MASS;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn partitioned_runs_match_sequential_run() {
    init_logging();
    let bodies = random_bodies(300, 4.0, 2024);
    let params = SimulationParameters {
        step_count: 10,
        theta: 0.5,
        dt: 0.01,
        ..Default::default()
    };

    let sequential = simulate(bodies.clone(), params).unwrap();
    for workers in [2, 4, 5] {
        let parallel = simulate(bodies.clone(), SimulationParameters { workers, ..params }).unwrap();
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.state, b.state);
            assert_vec_eq(a.position, b.position, 1e-12, Some("position"));
            assert_vec_eq(a.velocity, b.velocity, 1e-12, Some("velocity"));
        }
    }
}

#[test]
fn equal_pair_moves_symmetrically_in_one_step() {
    init_logging();
    let bodies = vec![
        Body::new(0, (1.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
        Body::new(1, (3.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
    ];
    let params = SimulationParameters {
        step_count: 1,
        dt: 1.0,
        ..Default::default()
    };
    let result = simulate(bodies, params).unwrap();

    let midpoint = (2.0, 2.0);
    let left = (midpoint.0 - result[0].position.0, result[0].position.1);
    let right = (result[1].position.0 - midpoint.0, result[1].position.1);
    assert_vec_eq(left, right, 1e-12, Some("mirror images across the midpoint"));
    assert!(result[0].position.0 > 1.0);
    assert!(result[1].position.0 < 3.0);
}

#[test]
fn escaped_bodies_never_change_again() {
    init_logging();
    let mut bodies = ScenarioConfig {
        count: 40,
        max_speed: 0.0,
        seed: 5,
        ..Default::default()
    }
    .generate();
    // Two fast bodies that leave through different edges.
    bodies.push(Body::new(40, (3.9, 2.0), (5.0, 0.0), 1.0).unwrap());
    bodies.push(Body::new(41, (2.0, 0.1), (0.0, -5.0), 1.0).unwrap());

    let params = SimulationParameters {
        step_count: 30,
        dt: 0.05,
        workers: 3,
        ..Default::default()
    };
    let mut sim = Simulation::new(bodies, params).unwrap();
    sim.step().unwrap();

    let snapshot: Vec<Body> = sim.bodies().iter().filter(|b| b.id >= 40).copied().collect();
    assert!(snapshot.iter().all(|b| b.state == BodyState::Escaped && b.mass == ESCAPED_MASS));

    sim.run().unwrap();
    let after: Vec<Body> = sim.bodies().iter().filter(|b| b.id >= 40).copied().collect();
    assert_eq!(snapshot, after);

    // Escaped bodies are never inserted into later trees.
    let tree = QuadTree::build(sim.bodies(), Region::domain(4.0)).unwrap();
    assert_eq!(tree.root().body_count, sim.active_count());
}

#[test]
fn final_body_file_round_trips() {
    init_logging();
    let params = SimulationParameters {
        step_count: 3,
        ..Default::default()
    };
    let result = simulate(random_bodies(12, 4.0, 77), params).unwrap();

    let mut first = Vec::new();
    write_bodies(&mut first, &result).unwrap();
    let reread = read_bodies(first.as_slice()).unwrap();
    let mut second = Vec::new();
    write_bodies(&mut second, &reread).unwrap();

    assert_eq!(String::from_utf8(first).unwrap(), String::from_utf8(second).unwrap());
}
