mod body_file;

pub use body_file::*;

#[cfg(test)]
mod body_file_tests;
