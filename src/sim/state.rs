//! Round and session state
//!
//! A `Round` is rebuilt wholesale for every new table; the `Session` carries
//! what outlives rounds (score, RNG, settings).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, GridPoint};
use super::reveal::{Reveal, RevealFrame};
use super::trajectory::{ShotParams, Trajectory, calculate_trajectory};
use crate::geom::{GeometryError, GeometryResult, Point, Segment};
use crate::settings::Settings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Player is picking a grid crossing to aim at
    #[default]
    SelectingAim,
    /// Shot taken, path being revealed
    Animating,
    /// Path fully revealed and scored
    AfterAnimation,
}

/// How a settled shot ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Pocketed,
    Missed,
}

/// Table size and ball placement, in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundParams {
    pub width_cells: u32,
    pub height_cells: u32,
    /// Grid crossing the ball sits on, `(column, row)` from 1
    pub ball_cell: (u32, u32),
}

impl RoundParams {
    /// Random table within the configured size range, ball on an interior crossing
    ///
    /// Fails when the range cannot produce a table with an interior crossing.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> GeometryResult<Self> {
        if settings.min_cells < 2 || settings.min_cells > settings.max_cells {
            return Err(GeometryError::InvalidArgument(format!(
                "cell range {}..={} has no table with an interior crossing",
                settings.min_cells, settings.max_cells
            )));
        }
        let width_cells = rng.random_range(settings.min_cells..=settings.max_cells);
        let height_cells = rng.random_range(settings.min_cells..=settings.max_cells);
        let ball_cell = (
            rng.random_range(1..width_cells),
            rng.random_range(1..height_cells),
        );
        Ok(Self {
            width_cells,
            height_cells,
            ball_cell,
        })
    }
}

/// One table with one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub params: RoundParams,
    pub board: Board,
    /// Ball position
    pub ball: Point,
    /// Selected aim crossing
    pub aim: Option<GridPoint>,
    /// Path for the selected aim, computed on selection
    pub trajectory: Option<Trajectory>,
    pub phase: RoundPhase,
    pub reveal: Reveal,
}

impl Round {
    pub fn new(settings: &Settings, params: RoundParams) -> GeometryResult<Self> {
        let board = Board::from_layout(settings, params.width_cells, params.height_cells)?;
        let ball = board.grid_point(params.ball_cell).ok_or_else(|| {
            GeometryError::InvalidArgument(format!(
                "ball cell {:?} is not an interior crossing of a {}x{} board",
                params.ball_cell, params.width_cells, params.height_cells
            ))
        })?;

        Ok(Self {
            params,
            board,
            ball,
            aim: None,
            trajectory: None,
            phase: RoundPhase::SelectingAim,
            reveal: Reveal::default(),
        })
    }

    /// Aim at the grid crossing under `pos`, computing its trajectory
    ///
    /// Returns the chosen crossing, or `None` when `pos` is not on one (or is
    /// on the ball's own crossing). Re-aiming after a shot starts over.
    pub fn select_aim(&mut self, pos: Point, settings: &Settings) -> GeometryResult<Option<Point>> {
        let Some(target) = self.board.pick_grid_point(pos, settings.aim_pick_radius) else {
            return Ok(None);
        };
        if target.point == self.ball {
            log::debug!("Ignoring aim at the ball's own crossing {:?}", target.cell);
            return Ok(None);
        }

        let trajectory =
            calculate_trajectory(&self.board, self.ball, target.point, &ShotParams::from(settings))?;
        log::debug!(
            "Aim {:?}: {} contacts, pocketed={}",
            target.cell,
            trajectory.points.len(),
            trajectory.pocketed()
        );

        self.aim = Some(target);
        self.trajectory = Some(trajectory);
        self.phase = RoundPhase::SelectingAim;
        self.reveal.reset();
        Ok(Some(target.point))
    }

    /// Take the shot; false when there is nothing to shoot at
    pub fn hit(&mut self) -> bool {
        if self.phase != RoundPhase::SelectingAim || self.trajectory.is_none() {
            return false;
        }
        self.phase = RoundPhase::Animating;
        self.reveal.reset();
        true
    }

    /// Reveal `step` more of the path
    ///
    /// Returns the outcome on the step that finishes the reveal; the round
    /// then moves to `AfterAnimation` and further calls do nothing.
    pub fn advance(&mut self, step: f64) -> GeometryResult<Option<ShotOutcome>> {
        if self.phase != RoundPhase::Animating {
            return Ok(None);
        }
        let Some(trajectory) = &self.trajectory else {
            return Ok(None);
        };

        self.reveal.advance(step);
        if !self.reveal.frame(trajectory)?.complete {
            return Ok(None);
        }

        self.phase = RoundPhase::AfterAnimation;
        Ok(Some(if trajectory.pocketed() {
            ShotOutcome::Pocketed
        } else {
            ShotOutcome::Missed
        }))
    }

    /// The part of the path revealed so far
    pub fn visible_path(&self) -> GeometryResult<Option<RevealFrame>> {
        match (&self.trajectory, self.phase) {
            (Some(trajectory), RoundPhase::Animating | RoundPhase::AfterAnimation) => {
                self.reveal.frame(trajectory).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Dashed guide from the ball to the aim while aiming
    pub fn aim_guide(&self, dash_length: u64) -> GeometryResult<Vec<Segment>> {
        match (self.aim, self.phase) {
            (Some(aim), RoundPhase::SelectingAim) => {
                Segment::new(self.ball, aim.point).dashes(dash_length)
            }
            _ => Ok(Vec::new()),
        }
    }
}

/// Everything that outlives a single round
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    /// Seed the session RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub score: i64,
    /// Rounds started so far, including the current one
    pub rounds_played: u32,
    pub round: Round,
}

impl Session {
    /// Start a session with a random first round
    ///
    /// Settings that fail [`Settings::validate`] are rejected up front.
    pub fn new(settings: Settings, seed: u64) -> GeometryResult<Self> {
        settings
            .validate()
            .map_err(|e| GeometryError::InvalidArgument(e.to_string()))?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let params = RoundParams::random(&mut rng, &settings)?;
        let round = Round::new(&settings, params)?;
        log::info!("Session seeded with {}: first table {:?}", seed, params);

        Ok(Self {
            settings,
            seed,
            rng,
            score: 0,
            rounds_played: 1,
            round,
        })
    }

    /// Replace the current round with a fresh random one
    pub fn next_round(&mut self) -> GeometryResult<RoundParams> {
        let params = RoundParams::random(&mut self.rng, &self.settings)?;
        self.round = Round::new(&self.settings, params)?;
        self.rounds_played += 1;
        log::info!("Round {}: {:?}", self.rounds_played, params);
        Ok(params)
    }

    /// Apply a settled shot to the score
    pub fn settle(&mut self, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Pocketed => self.score += self.settings.pocket_reward,
            ShotOutcome::Missed => self.score -= self.settings.miss_penalty,
        }
        log::info!("Shot {:?}, score now {}", outcome, self.score);
    }
}
