mod parameters;
mod simulation;

pub use parameters::*;
pub use simulation::*;
