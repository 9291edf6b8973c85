use std::ops::{AddAssign, Range};

use crate::bodies::Body;
use crate::tree::{NodeId, QuadTree, ROOT};
use crate::utils::{magnitude, vec_add, vec_scale, vec_sub, GravityConstants};

/// Counters collected while walking the tree for one or more bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes the walk looked at, including empty ones.
    pub nodes_visited: usize,
    /// Internal nodes accepted by the MAC and treated as a single mass.
    pub approximations: usize,
    /// Individual body-body interactions evaluated at leaves.
    pub leaf_interactions: usize,
}

impl AddAssign for TraversalStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes_visited += other.nodes_visited;
        self.approximations += other.approximations;
        self.leaf_interactions += other.leaf_interactions;
    }
}

/// Accumulates the force on `body` from every other body in `tree` into `force`.
///
/// `index` is the body's position in the slice the tree was built from and is used
/// to skip the body's own leaf entry. Escaped bodies receive no force.
///
/// An internal node is treated as one mass at its center of mass when
/// `size / distance < theta`; otherwise its children are walked. `theta = 0`
/// never accepts an approximation and reproduces direct summation.
///
/// # Examples
///
/// ```
/// use rs_nbody::bodies::Body;
/// use rs_nbody::forces::compute_force;
/// use rs_nbody::tree::{QuadTree, Region};
/// use rs_nbody::utils::GravityConstants;
///
/// let bodies = vec![
///     Body::new(0, (1.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
///     Body::new(1, (3.0, 2.0), (0.0, 0.0), 1.0).unwrap(),
/// ];
/// let tree = QuadTree::build(&bodies, Region::domain(4.0)).unwrap();
///
/// let mut force = (0.0, 0.0);
/// compute_force(&tree, 0, &bodies[0], 0.5, &GravityConstants::default(), &mut force);
///
/// // Body 0 is pulled towards body 1 along +x.
/// assert!(force.0 > 0.0);
/// assert_eq!(force.1, 0.0);
/// ```
pub fn compute_force(
    tree: &QuadTree,
    index: usize,
    body: &Body,
    theta: f64,
    constants: &GravityConstants,
    force: &mut (f64, f64),
) -> TraversalStats {
    let mut stats = TraversalStats::default();
    if !body.is_active() {
        return stats;
    }
    accumulate(tree, ROOT, index, body, theta, constants, force, &mut stats);
    stats
}

#[allow(clippy::too_many_arguments)]
fn accumulate(
    tree: &QuadTree,
    node_id: NodeId,
    index: usize,
    body: &Body,
    theta: f64,
    constants: &GravityConstants,
    force: &mut (f64, f64),
    stats: &mut TraversalStats,
) {
    let node = tree.node(node_id);
    stats.nodes_visited += 1;
    if node.is_empty() {
        return;
    }

    if node.is_leaf() {
        for occupant in &node.occupants {
            if occupant.index == index {
                continue;
            }
            let f = constants.calculate_pair_force(body.position, body.mass, occupant.position, occupant.mass);
            *force = vec_add(*force, f);
            stats.leaf_interactions += 1;
        }
        return;
    }

    let d = vec_sub(node.center_of_mass, body.position);
    let distance = constants.softened_distance(magnitude(d));
    if node.region.size() / distance < theta {
        let scale = constants.g * node.total_mass * body.mass / (distance * distance * distance);
        *force = vec_add(*force, vec_scale(d, scale));
        stats.approximations += 1;
        return;
    }

    if let Some(children) = node.children {
        for child in children {
            accumulate(tree, child, index, body, theta, constants, force, stats);
        }
    }
}

/// Evaluates forces for the bodies at `range` of the slice `tree` was built from.
///
/// Returns one force per index in `range`, in order, plus the combined traversal counters.
pub fn compute_forces(
    tree: &QuadTree,
    bodies: &[Body],
    range: Range<usize>,
    theta: f64,
    constants: &GravityConstants,
) -> (Vec<(f64, f64)>, TraversalStats) {
    let mut forces = vec![(0.0, 0.0); range.len()];
    let mut stats = TraversalStats::default();
    for (slot, index) in range.enumerate() {
        stats += compute_force(tree, index, &bodies[index], theta, constants, &mut forces[slot]);
    }
    (forces, stats)
}
