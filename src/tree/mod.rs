mod region;
mod quadtree;

pub use region::*;
pub use quadtree::*;
