use crate::utils;

/// Gravitational constant in simulation units.
pub const G: f64 = 1.0e-4;

/// Minimum separation used when evaluating a pairwise force.
pub const RLIMIT: f64 = 0.03;

/// Side length of the square simulation domain `[0, size)²`.
pub const DEFAULT_DOMAIN_SIZE: f64 = 4.0;

/// Deepest level a quadtree subdivides to before leaves start holding several bodies.
pub const MAX_TREE_DEPTH: u32 = 48;

/// Mass written to a body once it has left the domain.
pub const ESCAPED_MASS: f64 = -1.0;

pub const DEFAULT_GRAVITY_CONSTANTS: utils::GravityConstants = utils::GravityConstants {
    g: G,
    rlimit: RLIMIT,
};
