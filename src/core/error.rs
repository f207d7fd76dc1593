use std::path::PathBuf;

use thiserror::Error;

/// Configuration and setup failures. Gameplay itself never produces these.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid board dimensions {width}x{height}, both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid mine density {0}, expected a value in [0, 1)")]
    InvalidDensity(f64),
    #[error("a session needs at least one layer")]
    InvalidLayerCount,
    #[error("invalid operand range {min}..={max}")]
    InvalidOperandRange { min: u32, max: u32 },
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
