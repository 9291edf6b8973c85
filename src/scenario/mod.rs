mod scenario;

pub use scenario::*;
