mod barnes_hut;
mod direct;

pub use barnes_hut::*;
pub use direct::*;
