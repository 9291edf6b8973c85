use std::fmt;
use std::error::Error;

/// Represents errors that can occur while loading or advancing a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Indicates a body whose mass is zero, negative or not finite at load time.
    InvalidMass { id: usize, mass: f64 },
    /// Indicates a non-positive or non-finite time step.
    InvalidTimeStep(f64),
    /// Indicates a step count of zero.
    InvalidStepCount,
    /// Indicates a negative or non-finite MAC threshold.
    InvalidTheta(f64),
    /// Indicates a non-positive or non-finite domain size.
    InvalidDomainSize(f64),
    /// Indicates a worker count of zero.
    InvalidWorkerCount,
    /// An active body lies outside the region a tree was built over.
    BodyOutsideRegion { id: usize },
    /// A body inside a node's region was rejected by every child region.
    StructuralInsertion { id: usize },
    /// A worker failed to deliver its partition before the step barrier.
    WorkerFailure(String),
    /// A body file could not be parsed; `line` is 1-based.
    Parse { line: usize, message: String },
    /// An underlying read or write failed.
    Io(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::InvalidMass { id, mass } => write!(f, "Invalid mass {} for body #{}", mass, id),
            SimulationError::InvalidTimeStep(dt) => write!(f, "Invalid time step: {}", dt),
            SimulationError::InvalidStepCount => write!(f, "Step count must be positive"),
            SimulationError::InvalidTheta(theta) => write!(f, "Invalid theta value: {}", theta),
            SimulationError::InvalidDomainSize(size) => write!(f, "Invalid domain size: {}", size),
            SimulationError::InvalidWorkerCount => write!(f, "Worker count must be positive"),
            SimulationError::BodyOutsideRegion { id } => write!(f, "Body #{} lies outside the tree region", id),
            SimulationError::StructuralInsertion { id } => {
                write!(f, "Error redistributing body #{}: no child region accepted it", id)
            }
            SimulationError::WorkerFailure(msg) => write!(f, "Worker failure: {}", msg),
            SimulationError::Parse { line, message } => write!(f, "Parse error on line {}: {}", line, message),
            SimulationError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl Error for SimulationError {}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Io(err.to_string())
    }
}
