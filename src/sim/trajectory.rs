//! Shot trajectory: wall reflections until pocket or bounce budget
//!
//! The ball travels in straight lines and reflects specularly. Each bounce
//! casts a long probe from the current contact point toward a far aim
//! target, intersects it with every cushion except the one just left, and
//! mirrors the aim target through the cushion that was hit.

use serde::{Deserialize, Serialize};

use super::board::{Board, WallSide};
use crate::consts::{MAX_BOUNCES, POCKET_TOLERANCE, PROBE_LENGTH};
use crate::geom::{GeometryResult, Point, Segment, intersect, make_vector};

/// Why the walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Last contact landed on a corner pocket
    Pocketed,
    /// Bounce budget used up without reaching a pocket
    BudgetExhausted,
    /// A probe crossed no cushion
    ///
    /// Besides a ball outside the table, this also happens on ordinary shots
    /// when rounding in the line intersection puts a contact a hair outside
    /// the cushion it should land on.
    NoWallHit,
}

/// Tuning for a trajectory walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotParams {
    /// Maximum number of wall contacts to compute
    pub max_bounces: u32,
    /// Per-axis distance from a corner that counts as pocketed
    pub pocket_tolerance: f64,
    /// Length of each probe; must exceed the board diagonal
    pub probe_length: f64,
}

impl Default for ShotParams {
    fn default() -> Self {
        Self {
            max_bounces: MAX_BOUNCES,
            pocket_tolerance: POCKET_TOLERANCE,
            probe_length: PROBE_LENGTH,
        }
    }
}

impl From<&crate::Settings> for ShotParams {
    fn from(settings: &crate::Settings) -> Self {
        Self {
            max_bounces: settings.max_bounces,
            pocket_tolerance: settings.pocket_tolerance,
            probe_length: settings.probe_length,
        }
    }
}

/// A computed shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Where the ball started
    pub start: Point,
    /// Wall contacts in travel order (the start is not included)
    pub points: Vec<Point>,
    /// Corner the ball dropped into
    pub pocket: Option<Point>,
    pub termination: Termination,
}

impl Trajectory {
    #[inline]
    pub fn pocketed(&self) -> bool {
        self.pocket.is_some()
    }

    /// Straight legs of the path, start first
    pub fn legs(&self) -> Vec<Segment> {
        std::iter::once(self.start)
            .chain(self.points.iter().copied())
            .zip(self.points.iter().copied())
            .map(|(from, to)| Segment::new(from, to))
            .collect()
    }

    /// Total travelled distance
    pub fn path_length(&self) -> f64 {
        self.legs().iter().map(Segment::length).sum()
    }
}

/// Compute the trajectory of a ball at `ball` struck toward `aim`
///
/// Fails only when `aim` coincides with `ball`. Running out of bounces and
/// probes that miss every wall are ordinary outcomes reported through
/// [`Termination`].
pub fn calculate_trajectory(
    board: &Board,
    ball: Point,
    aim: Point,
    params: &ShotParams,
) -> GeometryResult<Trajectory> {
    let mut start = ball;
    let mut target = make_vector(ball, aim, params.probe_length)?.end;
    let mut last_wall: Option<WallSide> = None;
    let mut points = Vec::with_capacity(params.max_bounces as usize);

    for bounce in 0..params.max_bounces {
        let probe = make_vector(start, target, params.probe_length)?;

        let hit = board
            .walls
            .iter()
            .filter(|wall| Some(wall.side) != last_wall)
            .find_map(|wall| intersect(&wall.segment, &probe).map(|p| (wall, p)));

        let Some((wall, contact)) = hit else {
            log::warn!(
                "Lost shot: probe from {} toward {} crossed no wall (bounce {})",
                start,
                target,
                bounce
            );
            return Ok(Trajectory {
                start: ball,
                points,
                pocket: None,
                termination: Termination::NoWallHit,
            });
        };

        points.push(contact);
        log::debug!("Bounce {}: {} wall at {}", bounce, wall.side.as_str(), contact);

        if let Some(corner) = board.corner_near(contact, params.pocket_tolerance) {
            log::debug!("Pocketed at {} after {} contacts", corner, points.len());
            return Ok(Trajectory {
                start: ball,
                points,
                pocket: Some(corner),
                termination: Termination::Pocketed,
            });
        }

        target = wall.reflect(contact, target);
        start = contact;
        last_wall = Some(wall.side);
    }

    Ok(Trajectory {
        start: ball,
        points,
        pocket: None,
        termination: Termination::BudgetExhausted,
    })
}
