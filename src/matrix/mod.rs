// Matrix data structures

pub mod crs;

pub use crs::CrsMatrix;
