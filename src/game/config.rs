use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;
use super::grid::Grid;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in world units
    pub game_width: i32,
    /// Height (depth) of the playing field in world units
    pub game_height: i32,
    /// Side of one grid cell in world units
    pub segment_size: i32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Timing
    /// Milliseconds of wall time per simulation tick
    pub tick_interval_ms: u64,
    /// Most ticks applied in a single frame; `None` catches up without limit
    pub max_catch_up_ticks: Option<u32>,

    // Fruit
    /// Random draws before fruit placement falls back to scanning free cells
    pub max_spawn_attempts: u32,
    /// Wait for the eat animation to finish before moving the fruit
    pub defer_fruit_respawn: bool,
    /// Total length of the eat animation (scale up, then back down)
    pub pulse_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: 400,
            game_height: 400,
            segment_size: 10,
            initial_snake_length: 3,
            tick_interval_ms: 150,
            max_catch_up_ticks: Some(5),
            max_spawn_attempts: 4096,
            defer_fruit_respawn: true,
            pulse_duration_ms: 150,
        }
    }
}

impl GameConfig {
    /// Largest field accepted; the spawner and renderer enumerate every cell
    pub const MAX_CELLS: usize = 1 << 20;

    /// Create a new configuration with a custom field size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            game_width: width,
            game_height: height,
            ..Default::default()
        }
    }

    /// Create a small field for testing
    pub fn small() -> Self {
        Self::new(100, 100)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.game_width, self.game_height, self.segment_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn pulse_duration(&self) -> Duration {
        Duration::from_millis(self.pulse_duration_ms)
    }

    /// Check that the configuration describes a playable field
    pub fn validate(&self) -> Result<(), GameError> {
        if self.segment_size <= 0 {
            return Err(GameError::InvalidConfig(
                "segment_size must be positive".into(),
            ));
        }

        for (name, extent) in [("game_width", self.game_width), ("game_height", self.game_height)] {
            if extent <= 0 || extent % self.segment_size != 0 {
                return Err(GameError::InvalidConfig(format!(
                    "{} ({}) must be a positive multiple of segment_size ({})",
                    name, extent, self.segment_size
                )));
            }
        }

        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be positive".into(),
            ));
        }

        if self.max_catch_up_ticks == Some(0) {
            return Err(GameError::InvalidConfig(
                "max_catch_up_ticks must be at least 1".into(),
            ));
        }

        let grid = self.grid();
        if grid.cell_count() > Self::MAX_CELLS {
            return Err(GameError::InvalidConfig(format!(
                "field of {}x{} cells exceeds the limit of {} cells",
                grid.columns(),
                grid.rows(),
                Self::MAX_CELLS
            )));
        }

        // The snake is laid out leftwards from the centre column and needs a free cell for fruit
        let max_length = (grid.columns() / 2 + 1) as usize;
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(GameError::InvalidConfig(format!(
                "initial_snake_length ({}) must be between 1 and {}",
                self.initial_snake_length, max_length
            )));
        }
        if self.initial_snake_length >= grid.cell_count() {
            return Err(GameError::InvalidConfig(
                "initial snake leaves no room for fruit".into(),
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize game configuration")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
