//! Game configuration
//!
//! Read from `plata.ron` in the working directory. Every field is optional;
//! a missing file means all defaults.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use macroquad::logging::warn;
use serde::{Serialize, Deserialize};

/// Default config file name
pub const CONFIG_FILE: &str = "plata.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    /// Frame cap (0 = unlocked, up to 30 = 30 FPS, anything else = 60 FPS)
    pub target_fps: u32,
    /// Level file (plain or brotli RON)
    pub level_path: String,
    /// Directory holding sprites and `sounds/`
    pub asset_dir: String,
    /// Start with the debug overlay on
    pub debug_overlay: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "plata".to_string(),
            window_width: 1024,
            window_height: 768,
            target_fps: 60,
            level_path: "assets/levels/plata.ron".to_string(),
            asset_dir: "assets".to_string(),
            debug_overlay: false,
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Parse a config from RON text
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load a config file. A file that does not exist gives the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Config from [`CONFIG_FILE`], read on first use and shared after that.
    pub fn shared() -> &'static GameConfig {
        static CONFIG: OnceLock<GameConfig> = OnceLock::new();
        CONFIG.get_or_init(|| Self::load_or_default(CONFIG_FILE))
    }

    /// Load the config, falling back to defaults (with a warning) on errors
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = GameConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = GameConfig::parse("(window_width: 640, debug_overlay: true)").unwrap();
        assert_eq!(config.window_width, 640);
        assert!(config.debug_overlay);
        assert_eq!(config.window_height, 768);
        assert_eq!(config.level_path, "assets/levels/plata.ron");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "(target_fps: 30, asset_dir: \"data\")").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.asset_dir, "data");
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "(window_width: \"wide\")").unwrap();

        assert!(matches!(GameConfig::load(&path), Err(ConfigError::ParseError(_))));
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
    }

    #[test]
    fn test_shared_config_is_loaded_once() {
        let first = GameConfig::shared();
        let second = GameConfig::shared();
        assert!(std::ptr::eq(first, second));
    }
}
