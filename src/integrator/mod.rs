mod integrator;

pub use integrator::*;
