//! Per-frame session update
//!
//! The presentation layer collects input for a frame and hands it to `tick`,
//! which applies it in a fixed order and reports what happened.

use serde::{Deserialize, Serialize};

use super::state::{RoundParams, RoundPhase, Session, ShotOutcome};
use crate::geom::{GeometryResult, Point};

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click position, if the player clicked the table
    pub click: Option<Point>,
    /// "Hit it!" pressed
    pub hit: bool,
    /// "Next" pressed
    pub next_round: bool,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NewRound(RoundParams),
    AimSelected { cell: (u32, u32), pocketed: bool },
    ShotStarted,
    ShotSettled { outcome: ShotOutcome, score: i64 },
}

/// Advance the session by one frame
///
/// Order: next round, aim selection, shot, reveal step. Settling the score
/// happens on the frame the reveal completes.
pub fn tick(session: &mut Session, input: &TickInput) -> GeometryResult<Vec<GameEvent>> {
    let mut events = Vec::new();

    if input.next_round {
        let params = session.next_round()?;
        events.push(GameEvent::NewRound(params));
    }

    if let Some(pos) = input.click {
        let settings = &session.settings;
        if session.round.select_aim(pos, settings)?.is_some() {
            if let (Some(aim), Some(trajectory)) = (&session.round.aim, &session.round.trajectory) {
                events.push(GameEvent::AimSelected {
                    cell: aim.cell,
                    pocketed: trajectory.pocketed(),
                });
            }
        }
    }

    if input.hit && session.round.hit() {
        events.push(GameEvent::ShotStarted);
    }

    if session.round.phase == RoundPhase::Animating {
        let step = session.settings.reveal_step;
        if let Some(outcome) = session.round.advance(step)? {
            session.settle(outcome);
            events.push(GameEvent::ShotSettled {
                outcome,
                score: session.score,
            });
        }
    }

    Ok(events)
}
