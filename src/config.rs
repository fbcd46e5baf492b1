//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SP_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use stackplus_core::{MotionConfig, SessionConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Round tuning
    #[serde(default)]
    pub game: GameConfig,
    /// Shape dataset
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// High score file
    #[serde(default)]
    pub scores: ScoresConfig,
    /// Player settings
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SP_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SP_GAME__LIVES=5 -> game.lives = 5
        figment = figment.merge(Env::prefixed("SP_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Round tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Level played when none is chosen
    pub level: String,
    /// Lives per round
    pub lives: u32,
    /// Seconds allowed per placement
    pub placement_time: f64,
    /// Half extent of the control block sweep
    pub amplitude: f64,
    /// Seconds per sweep
    pub period: f64,
    /// Yaw quantization in degrees
    pub theta_step: f64,
    /// Tower layers kept for drawing
    pub max_visible_layers: usize,
    /// Intersection snapping grid
    pub tolerance: f64,
    /// Block height
    pub depth: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            level: "square".to_string(),
            lives: session.lives,
            placement_time: session.placement_time,
            amplitude: session.motion.amplitude,
            period: session.motion.period,
            theta_step: session.motion.theta_step,
            max_visible_layers: session.max_visible_layers,
            tolerance: session.tolerance,
            depth: session.depth,
        }
    }
}

impl GameConfig {
    /// Convert to the session's tuning type
    pub fn to_session_config(&self, settings: &SettingsConfig) -> SessionConfig {
        SessionConfig {
            lives: self.lives,
            placement_time: self.placement_time,
            motion: MotionConfig {
                amplitude: self.amplitude,
                period: self.period,
                theta_step: self.theta_step,
                invert_x_axis: settings.invert_x_axis,
            },
            max_visible_layers: self.max_visible_layers,
            tolerance: self.tolerance,
            depth: self.depth,
        }
    }
}

/// Shape dataset location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// RON dataset to load instead of the built-in shapes
    pub path: Option<String>,
}

/// High score file location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoresConfig {
    /// RON file holding per-shape best scores
    pub path: String,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            path: "highscores.ron".to_string(),
        }
    }
}

/// Highest music or sound effect level
pub const MAX_VOLUME: u8 = 3;

/// Player settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Music volume, 0 (off) to 3
    pub music: u8,
    /// Sound effect volume, 0 (off) to 3
    pub sfx: u8,
    /// Mirror the pointer when choosing the block's yaw
    pub invert_x_axis: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            music: MAX_VOLUME,
            sfx: MAX_VOLUME,
            invert_x_axis: false,
        }
    }
}

impl SettingsConfig {
    /// Same settings with volumes clamped to the valid range
    pub fn clamped(mut self) -> Self {
        self.music = self.music.min(MAX_VOLUME);
        self.sfx = self.sfx.min(MAX_VOLUME);
        self
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Fixed seed for the round generator
    pub seed: Option<u64>,
    /// Frames the headless autoplay may run before giving up
    pub max_frames: u32,
    /// Largest yaw misjudgement of the autoplay, in degrees
    pub autoplay_yaw_error: f64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
            max_frames: 60 * 60 * 5,
            autoplay_yaw_error: 12.0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.game.lives, 3);
        assert_eq!(config.game.placement_time, 6.0);
        assert_eq!(config.game.level, "square");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("level"));
        assert!(!toml.contains("window"));
        assert!(toml.contains("placement_time"));
        assert!(toml.contains("invert_x_axis"));
    }

    #[test]
    fn test_session_config_conversion() {
        let mut config = AppConfig::default();
        config.game.lives = 5;
        config.settings.invert_x_axis = true;
        let session = config.game.to_session_config(&config.settings);
        assert_eq!(session.lives, 5);
        assert!(session.motion.invert_x_axis);
        assert_eq!(session.motion.period, 3.5);
        assert_eq!(session.max_visible_layers, 7);
    }

    #[test]
    fn test_settings_clamped() {
        let settings = SettingsConfig { music: 9, sfx: 2, invert_x_axis: false }.clamped();
        assert_eq!(settings.music, 3);
        assert_eq!(settings.sfx, 2);
    }
}
