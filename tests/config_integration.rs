//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use stackplus::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SP_GAME__LEVEL", "triangle");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.game.level, "triangle");
    std::env::remove_var("SP_GAME__LEVEL");
}

#[test]
#[serial]
fn test_env_override_numeric() {
    std::env::set_var("SP_GAME__LIVES", "5");
    std::env::set_var("SP_SETTINGS__INVERT_X_AXIS", "true");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.game.lives, 5);
    assert!(config.settings.invert_x_axis);
    let session = config.game.to_session_config(&config.settings);
    assert_eq!(session.lives, 5);
    assert!(session.motion.invert_x_axis);
    std::env::remove_var("SP_GAME__LIVES");
    std::env::remove_var("SP_SETTINGS__INVERT_X_AXIS");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("SP_GAME__LEVEL");
    std::env::remove_var("SP_GAME__LIVES");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.game.placement_time, defaults.game.placement_time);
    assert_eq!(config.game.period, defaults.game.period);
    assert_eq!(config.game.max_visible_layers, defaults.game.max_visible_layers);
    assert_eq!(config.scores.path, defaults.scores.path);
    assert_eq!(config.game.level, defaults.game.level);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("definitely/not/a/config/dir").unwrap();
    assert_eq!(config.game.level, "square");
    assert_eq!(config.game.lives, 3);
}
