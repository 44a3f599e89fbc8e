//! Progressive reveal of a shot path
//!
//! After a shot the path is drawn a little further each step. The reveal
//! tracks how much of the path length is visible and cuts the trajectory
//! into fully drawn legs plus one partial leg.

use serde::{Deserialize, Serialize};

use super::trajectory::Trajectory;
use crate::geom::{GeometryResult, Segment, make_vector};

/// Visible part of a trajectory at one moment
#[derive(Debug, Clone, PartialEq)]
pub struct RevealFrame {
    /// Legs to draw, the last one possibly cut short
    pub segments: Vec<Segment>,
    /// Whether every leg is fully drawn
    pub complete: bool,
}

/// How far along the path the reveal has got
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reveal {
    pub revealed: f64,
}

impl Reveal {
    pub fn reset(&mut self) {
        self.revealed = 0.0;
    }

    /// Grow the visible length by `step`
    pub fn advance(&mut self, step: f64) {
        self.revealed += step;
    }

    /// Cut `trajectory` at the revealed length
    pub fn frame(&self, trajectory: &Trajectory) -> GeometryResult<RevealFrame> {
        let mut remaining = self.revealed;
        let mut segments = Vec::with_capacity(trajectory.points.len());

        for leg in trajectory.legs() {
            let length = leg.length();
            if length <= remaining {
                segments.push(leg);
                remaining -= length;
            } else {
                segments.push(make_vector(leg.start, leg.end, remaining)?);
                return Ok(RevealFrame {
                    segments,
                    complete: false,
                });
            }
        }

        Ok(RevealFrame {
            segments,
            complete: true,
        })
    }
}
