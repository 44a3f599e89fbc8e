//! Pocket Shot - billiard trajectories on a rectangular table
//!
//! Core modules:
//! - `geom`: Planar primitives (points, segments, the ray builder, intersection)
//! - `sim`: Board, trajectory engine, round and session state
//! - `settings`: Table layout and scoring configuration

pub mod geom;
pub mod settings;
pub mod sim;

pub use geom::{GeometryError, GeometryResult, Point, Segment, intersect, make_vector};
pub use settings::{Settings, SettingsError};
pub use sim::{Board, Trajectory, calculate_trajectory};

/// Engine constants
pub mod consts {
    /// Length of the probe cast from each contact point; far longer than any table
    pub const PROBE_LENGTH: f64 = 1e7;
    /// Wall contacts computed before a shot counts as a miss
    pub const MAX_BOUNCES: u32 = 5;
    /// Per-axis distance from a corner that still drops the ball
    pub const POCKET_TOLERANCE: f64 = 2.0;
}
