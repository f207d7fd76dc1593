//! Session configuration, loaded from JSON and validated up front.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::constants::*;
use super::error::{GameError, Result};
use crate::challenge::ProblemSettings;

const CONFIG_FILE_NAME: &str = "config.json";

/// Tunables for a game session. Every field has a default, so a config file
/// only needs to list the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Columns per layer.
    pub width: usize,
    /// Rows per layer.
    pub height: usize,
    /// Fraction of cells holding a mine, in [0, 1).
    pub mine_density: f64,
    /// Layers to clear before the session is won.
    pub total_layers: u32,
    /// Scanner charges granted at the start of a session.
    pub scanner_charges: u32,
    pub challenge_time_limit_ms: u64,
    /// Extra time after the limit before a pending challenge auto-fails.
    pub challenge_grace_ms: u64,
    /// Delay between completing a layer and generating the next one.
    pub layer_transition_ms: u64,
    pub operand_min: u32,
    pub operand_max: u32,
    pub max_problem_attempts: u32,
    /// Forget issued defuse problems when the player restarts.
    pub reset_problem_history_on_restart: bool,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            mine_density: DEFAULT_MINE_DENSITY,
            total_layers: DEFAULT_TOTAL_LAYERS,
            scanner_charges: DEFAULT_SCANNER_CHARGES,
            challenge_time_limit_ms: CHALLENGE_TIME_LIMIT_MS,
            challenge_grace_ms: CHALLENGE_GRACE_MS,
            layer_transition_ms: LAYER_TRANSITION_MS,
            operand_min: DEFAULT_OPERAND_MIN,
            operand_max: DEFAULT_OPERAND_MAX,
            max_problem_attempts: MAX_PROBLEM_ATTEMPTS,
            reset_problem_history_on_restart: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Missing or unreadable files are an error here;
    /// see [`GameConfig::load_or_default`] for the lenient lookup.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load `path` if given, else the platform config file if it exists,
    /// else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `config.json` inside the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "clover").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        validate_board_params(self.width, self.height, self.mine_density)?;
        if self.total_layers == 0 {
            return Err(GameError::InvalidLayerCount);
        }
        if self.operand_min > self.operand_max {
            return Err(GameError::InvalidOperandRange {
                min: self.operand_min,
                max: self.operand_max,
            });
        }
        Ok(())
    }

    pub fn problem_settings(&self) -> ProblemSettings {
        ProblemSettings {
            operand_min: self.operand_min,
            operand_max: self.operand_max,
            max_attempts: self.max_problem_attempts,
        }
    }
}

/// Shared by config validation and the board generator.
pub fn validate_board_params(width: usize, height: usize, mine_density: f64) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GameError::InvalidDimensions { width, height });
    }
    if !(0.0..1.0).contains(&mine_density) {
        return Err(GameError::InvalidDensity(mine_density));
    }
    Ok(())
}
