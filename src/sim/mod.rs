//! Table simulation
//!
//! All gameplay logic lives here. Like the geometry below it, this module is
//! deterministic:
//! - Seeded RNG only
//! - Fixed wall probing order
//! - No rendering or platform dependencies

pub mod board;
pub mod reveal;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use board::{Board, GridPoint, MirrorAxis, Wall, WallSide};
pub use reveal::{Reveal, RevealFrame};
pub use state::{Round, RoundParams, RoundPhase, Session, ShotOutcome};
pub use tick::{GameEvent, TickInput, tick};
pub use trajectory::{ShotParams, Termination, Trajectory, calculate_trajectory};
