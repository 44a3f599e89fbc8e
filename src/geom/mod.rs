//! Planar geometry primitives
//!
//! Everything in here is a pure function of its inputs:
//! - `Point` arithmetic and lengths
//! - `Segment` and the `make_vector` ray builder
//! - `intersect` for bounded segments, degenerate cases included

pub mod intersect;
pub mod point;
pub mod segment;

pub use intersect::intersect;
pub use point::Point;
pub use segment::{Segment, make_vector};

use thiserror::Error;

/// Errors raised by geometry operations on malformed input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
