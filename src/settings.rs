//! Table and game settings
//!
//! Persisted as a JSON file next to the binary. Missing fields take their
//! defaults, so older settings files keep loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen / table layout ===
    /// Drawing surface width in pixels (the table is centred on it)
    pub screen_width: u32,
    /// Drawing surface height in pixels
    pub screen_height: u32,
    /// Side of one table cell in pixels
    pub cell_size: u32,
    /// Thickness of the grid lines between cells
    pub line_thickness: u32,
    /// Smallest table size in cells (per axis, inclusive)
    pub min_cells: u32,
    /// Largest table size in cells (per axis, inclusive)
    pub max_cells: u32,

    // === Shot ===
    /// Per-axis distance from a corner that still counts as pocketed
    pub pocket_tolerance: f64,
    /// Per-axis distance from a grid point that selects it as the aim
    pub aim_pick_radius: f64,
    /// Length of the probe segment cast each bounce
    pub probe_length: f64,
    /// Wall reflections computed before the shot is called a miss
    pub max_bounces: u32,

    // === Reveal / scoring ===
    /// Path length revealed per animation step
    pub reveal_step: f64,
    /// Dash length of the aim guide
    pub aim_dash_length: u64,
    /// Points gained for a pocketed ball
    pub pocket_reward: i64,
    /// Points lost for a miss
    pub miss_penalty: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 800,
            cell_size: 50,
            line_thickness: 1,
            min_cells: 5,
            max_cells: 10,

            pocket_tolerance: crate::consts::POCKET_TOLERANCE,
            aim_pick_radius: 10.0,
            probe_length: crate::consts::PROBE_LENGTH,
            max_bounces: crate::consts::MAX_BOUNCES,

            reveal_step: 10.0,
            aim_dash_length: 10,
            pocket_reward: 5,
            miss_penalty: 1,
        }
    }
}

impl Settings {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cell_size == 0 {
            return Err(SettingsError::Invalid("cell_size must be positive".into()));
        }
        if self.min_cells < 2 || self.min_cells > self.max_cells {
            return Err(SettingsError::Invalid(format!(
                "cell range {}..={} must start at 2 or more and not be empty",
                self.min_cells, self.max_cells
            )));
        }
        let widest = self.board_extent(self.max_cells);
        if widest > u64::from(self.screen_width) || widest > u64::from(self.screen_height) {
            return Err(SettingsError::Invalid(format!(
                "a {n}x{n} board ({widest}px) does not fit the {}x{} screen",
                self.screen_width,
                self.screen_height,
                n = self.max_cells
            )));
        }
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        if !non_negative(self.pocket_tolerance) || !non_negative(self.aim_pick_radius) {
            return Err(SettingsError::Invalid(
                "tolerances must be non-negative".into(),
            ));
        }
        if !self.probe_length.is_finite() || self.probe_length <= 0.0 {
            return Err(SettingsError::Invalid(
                "probe_length must be positive and finite".into(),
            ));
        }
        if !self.reveal_step.is_finite() || self.reveal_step <= 0.0 {
            return Err(SettingsError::Invalid("reveal_step must be positive".into()));
        }
        Ok(())
    }

    /// Pixel extent of a board `cells` cells wide
    pub fn board_extent(&self, cells: u32) -> u64 {
        u64::from(self.cell_size) * u64::from(cells)
            + u64::from(self.line_thickness) * u64::from(cells.saturating_sub(1))
    }

    /// Distance between neighbouring grid lines
    pub fn grid_pitch(&self) -> f64 {
        f64::from(self.cell_size + self.line_thickness)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
