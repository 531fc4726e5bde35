use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLS: usize = 7;
pub const DEFAULT_CONNECT: usize = 4;
/// Largest accepted board dimension.
pub const MAX_DIMENSION: usize = 16;
/// Key the presentation layer stores `{moves, onePlayer}` under.
pub const STORAGE_KEY: &str = "connect-four-state";

pub const DEFAULT_AI_DELAY_MS: u64 = 400;
pub const DEFAULT_CELEBRATION_MS: u64 = 3000;

/// Board geometry: grid size and the run length needed to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub connect: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            connect: DEFAULT_CONNECT,
        }
    }
}

impl GameConfig {
    /// Builds a validated configuration.
    pub fn new(rows: usize, cols: usize, connect: usize) -> Result<Self, ConfigError> {
        let config = Self {
            rows,
            cols,
            connect,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::Validation(
                "rows and cols must be > 0".into(),
            ));
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "rows and cols must be <= {MAX_DIMENSION}"
            )));
        }
        if self.connect < 2 {
            return Err(ConfigError::Validation("connect must be >= 2".into()));
        }
        if self.connect > self.rows.min(self.cols) {
            return Err(ConfigError::Validation(
                "connect must be <= min(rows, cols)".into(),
            ));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Timing and opponent settings used by [`crate::session::GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub game: GameConfig,
    /// Delay before the AI answers a human move.
    pub ai_delay_ms: u64,
    /// How long the win celebration flag stays raised.
    pub celebration_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            ai_delay_ms: DEFAULT_AI_DELAY_MS,
            celebration_ms: DEFAULT_CELEBRATION_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()
    }
}
