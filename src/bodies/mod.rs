mod body;

pub use body::*;

#[cfg(test)]
mod body_tests;
