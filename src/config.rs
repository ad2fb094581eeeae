//! Application configuration.

use anyhow::{bail, Context};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::GameConfig;

/// Config file picked up from the working directory when no `--config` is given
pub const LOCAL_CONFIG_FILE: &str = ".torus-snake.toml";

/// Prefix of environment overrides; `__` separates sections, e.g.
/// `TORUS_SNAKE_GAME__CELL_SIZE=16`
pub const ENV_PREFIX: &str = "TORUS_SNAKE_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frames drawn per second
    pub frame_rate: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { frame_rate: 60 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Path to log file. The terminal belongs to the game, so nothing is
    /// logged unless this is set.
    pub log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    pub log_level: Option<String>,
}

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Values given on the command line; `None` leaves lower layers in charge
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub cell_size: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub speed: Option<u32>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load configuration with full priority chain: CLI args > env vars > config file > defaults.
    ///
    /// The config file is `--config PATH` when given (it must exist), otherwise
    /// `.torus-snake.toml` in the current directory if present.
    pub fn load(overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let file = match &overrides.config_file {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file {} does not exist", path.display());
                }
                Some(path.clone())
            }
            None => std::env::current_dir()
                .ok()
                .map(|dir| dir.join(LOCAL_CONFIG_FILE))
                .filter(|path| path.is_file()),
        };

        Self::layered(
            file.as_deref(),
            Some(Env::prefixed(ENV_PREFIX).split("__")),
            overrides,
        )
    }

    /// Defaults, then the TOML file if any, then the CLI overrides. Skips the
    /// environment.
    pub fn from_sources(file: Option<&Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        Self::layered(file, None, overrides)
    }

    fn layered(
        file: Option<&Path>,
        env: Option<Env>,
        overrides: &ConfigOverrides,
    ) -> anyhow::Result<Self> {
        // Build figment with priority: defaults < config file < env vars < CLI args
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(env) = env {
            figment = figment.merge(env);
        }

        if let Some(cell_size) = overrides.cell_size {
            figment = figment.merge(Serialized::default("game.cell_size", cell_size));
        }
        if let Some(width) = overrides.width {
            figment = figment.merge(Serialized::default("game.viewport_width", width));
        }
        if let Some(height) = overrides.height {
            figment = figment.merge(Serialized::default("game.viewport_height", height));
        }
        if let Some(speed) = overrides.speed {
            figment = figment.merge(Serialized::default("game.base_tick_rate", speed));
        }
        if let Some(seed) = overrides.seed {
            figment = figment.merge(Serialized::default("game.seed", seed));
        }
        if let Some(ref log_file) = overrides.log_file {
            figment = figment.merge(Serialized::default("logging.log_file", log_file));
        }
        if let Some(ref log_level) = overrides.log_level {
            figment = figment.merge(Serialized::default("logging.log_level", log_level));
        }

        figment.extract().context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PlacementStrategy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_sources(None, &ConfigOverrides::default()).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.game.cell_size, 20);
        assert_eq!(config.game.base_tick_rate, 8);
        assert_eq!(config.game.reset_delay_ms, 600);
        assert_eq!(config.game.food_strategy, PlacementStrategy::Adaptive);
        assert_eq!(config.ui.frame_rate, 60);
        assert!(config.logging.log_file.is_none());
    }

    #[test]
    fn test_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(
            &path,
            r#"
[game]
cell_size = 16
max_tick_rate = 15
food_strategy = "enumerate_free"
seed = 42

[ui]
frame_rate = 30

[logging]
log_level = "debug"
"#,
        )
        .unwrap();

        let config = AppConfig::from_sources(Some(&path), &ConfigOverrides::default()).unwrap();

        assert_eq!(config.game.cell_size, 16);
        assert_eq!(config.game.max_tick_rate, 15);
        assert_eq!(config.game.food_strategy, PlacementStrategy::EnumerateFree);
        assert_eq!(config.game.seed, Some(42));
        // Untouched keys keep their defaults
        assert_eq!(config.game.viewport_width, 400);
        assert_eq!(config.ui.frame_rate, 30);
        assert_eq!(config.logging.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.toml");
        fs::write(&path, "[game]\ncell_size = 16\nbase_tick_rate = 5\n").unwrap();

        let overrides = ConfigOverrides {
            cell_size: Some(10),
            width: Some(300),
            height: Some(200),
            seed: Some(7),
            log_file: Some(temp_dir.path().join("snake.log")),
            ..Default::default()
        };
        let config = AppConfig::from_sources(Some(&path), &overrides).unwrap();

        assert_eq!(config.game.cell_size, 10);
        assert_eq!(config.game.base_tick_rate, 5);
        assert_eq!(config.game.viewport_width, 300);
        assert_eq!(config.game.viewport_height, 200);
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(
            config.logging.log_file,
            Some(temp_dir.path().join("snake.log"))
        );
    }

    #[test]
    fn test_speed_flag_sets_base_rate() {
        let overrides = ConfigOverrides {
            speed: Some(12),
            ..Default::default()
        };
        let config = AppConfig::from_sources(None, &overrides).unwrap();
        assert_eq!(config.game.base_tick_rate, 12);
        assert_eq!(config.game.max_tick_rate, 20);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[game]\ncell_size = \"big\"\n").unwrap();

        assert!(AppConfig::from_sources(Some(&path), &ConfigOverrides::default()).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(temp_dir.path().join("nope.toml")),
            ..Default::default()
        };
        let err = AppConfig::load(&overrides).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
