use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the game
///
/// Missing fields in a config file fall back to [`GameConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Ticks per second at score zero
    pub base_tick_rate: u32,
    /// One extra tick per second for every this many points
    pub speedup_every: u32,
    /// Length of the countdown shown before each round, in seconds
    pub countdown_secs: u64,
    /// Pause on the game over screen before input is accepted, in seconds
    pub game_over_pause_secs: u64,
    /// Ring the terminal bell when healthy food is eaten
    pub sound: bool,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            base_tick_rate: 12,
            speedup_every: 3,
            countdown_secs: 3,
            game_over_pause_secs: 2,
            sound: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small seeded grid for testing
    pub fn small() -> Self {
        Self {
            seed: Some(7),
            ..Self::new(10, 10)
        }
    }

    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can produce a playable game
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 2 && self.grid_height >= 2,
            "grid must be at least 2x2, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "grid {}x{} is too large",
            self.grid_width,
            self.grid_height
        );
        ensure!(self.base_tick_rate > 0, "base_tick_rate must be positive");
        ensure!(self.speedup_every > 0, "speedup_every must be at least 1");
        Ok(())
    }

    /// Ticks per second for the given score
    pub fn tick_rate(&self, score: u32) -> u32 {
        self.base_tick_rate
            .saturating_add(score / self.speedup_every.max(1))
    }

    /// Time between ticks for the given score
    pub fn tick_interval(&self, score: u32) -> Duration {
        Duration::from_secs(1) / self.tick_rate(score).max(1)
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_secs(self.countdown_secs)
    }

    pub fn game_over_pause(&self) -> Duration {
        Duration::from_secs(self.game_over_pause_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.base_tick_rate, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
    }

    #[test]
    fn test_tick_rate_grows_with_score() {
        let config = GameConfig::default();
        assert_eq!(config.tick_rate(0), 12);
        assert_eq!(config.tick_rate(2), 12);
        assert_eq!(config.tick_rate(3), 13);
        assert_eq!(config.tick_rate(30), 22);
        assert!(config.tick_interval(30) < config.tick_interval(0));
        assert_eq!(config.tick_interval(0), Duration::from_nanos(83_333_333));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GameConfig::new(1, 10).validate().is_err());
        assert!(GameConfig::new(10, 0).validate().is_err());

        let mut config = GameConfig::default();
        config.base_tick_rate = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.speedup_every = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 12, "sound": false, "seed": 42 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert!(!config.sound);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 1 }}"#).unwrap();
        assert!(GameConfig::load(file.path()).is_err());

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        write!(garbage, "not json").unwrap();
        assert!(GameConfig::load(garbage.path()).is_err());
    }
}
