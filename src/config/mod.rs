//! This module handles the application's configuration, including loading and
//! saving HUD display preferences to a `settings.toml` file.
//!
//! The display flags mirror what the bottom bar renders: clock, location,
//! field of view and frame rate, plus the formatting toggles (Julian day,
//! DMS field of view, timezone suffix). The `gui` section carries the pixmap
//! scale all button images are normalized to at construction.

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedSkybar";

/// Which status fields the bottom bar shows and how they are formatted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default = "d_show_datetime")]
    pub show_datetime: bool,
    #[serde(default = "d_show_location")]
    pub show_location: bool,
    #[serde(default = "d_show_fov")]
    pub show_fov: bool,
    #[serde(default = "d_show_fps")]
    pub show_fps: bool,
    /// Show the Julian day as the primary date form (calendar date moves to
    /// the tooltip).
    #[serde(default = "d_time_jd")]
    pub time_jd: bool,
    /// Format the field of view as degrees/minutes/seconds instead of
    /// decimal degrees.
    #[serde(default = "d_fov_dms")]
    pub fov_dms: bool,
    #[serde(default = "d_show_tz")]
    pub show_tz: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            show_datetime: defaults::DEFAULT_SHOW_DATETIME,
            show_location: defaults::DEFAULT_SHOW_LOCATION,
            show_fov: defaults::DEFAULT_SHOW_FOV,
            show_fps: defaults::DEFAULT_SHOW_FPS,
            time_jd: defaults::DEFAULT_TIME_JD,
            fov_dms: defaults::DEFAULT_FOV_DMS,
            show_tz: defaults::DEFAULT_SHOW_TZ,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuiSection {
    /// Device-independent scale applied once to all button pixmaps.
    #[serde(default = "d_pixmap_scale")]
    pub pixmap_scale: f32,
    /// Master switch for the button background pixmaps.
    #[serde(default = "d_use_button_background")]
    pub use_button_background: bool,
    #[serde(default = "d_font_size")]
    pub font_size: f32,
}

impl Default for GuiSection {
    fn default() -> Self {
        Self {
            pixmap_scale: defaults::DEFAULT_PIXMAP_SCALE,
            use_button_background: defaults::DEFAULT_USE_BUTTON_BACKGROUND,
            font_size: defaults::DEFAULT_FONT_SIZE,
        }
    }
}

/// Ambient conditions shown in the location tooltip for bodies with an
/// atmosphere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtmosphereSection {
    #[serde(default = "d_pressure")]
    pub pressure_mbar: f64,
    #[serde(default = "d_temperature")]
    pub temperature_c: f64,
}

impl Default for AtmosphereSection {
    fn default() -> Self {
        Self {
            pressure_mbar: defaults::DEFAULT_PRESSURE_MBAR,
            temperature_c: defaults::DEFAULT_TEMPERATURE_C,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub gui: GuiSection,
    #[serde(default)]
    pub atmosphere: AtmosphereSection,
}

// serde `default = "..."` requires free functions.
fn d_show_datetime() -> bool {
    defaults::DEFAULT_SHOW_DATETIME
}
fn d_show_location() -> bool {
    defaults::DEFAULT_SHOW_LOCATION
}
fn d_show_fov() -> bool {
    defaults::DEFAULT_SHOW_FOV
}
fn d_show_fps() -> bool {
    defaults::DEFAULT_SHOW_FPS
}
fn d_time_jd() -> bool {
    defaults::DEFAULT_TIME_JD
}
fn d_fov_dms() -> bool {
    defaults::DEFAULT_FOV_DMS
}
fn d_show_tz() -> bool {
    defaults::DEFAULT_SHOW_TZ
}
fn d_pixmap_scale() -> f32 {
    defaults::DEFAULT_PIXMAP_SCALE
}
fn d_use_button_background() -> bool {
    defaults::DEFAULT_USE_BUTTON_BACKGROUND
}
fn d_font_size() -> f32 {
    defaults::DEFAULT_FONT_SIZE
}
fn d_pressure() -> f64 {
    defaults::DEFAULT_PRESSURE_MBAR
}
fn d_temperature() -> f64 {
    defaults::DEFAULT_TEMPERATURE_C
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_flags() {
        let mut config = Config::default();
        config.display.time_jd = true;
        config.display.show_fps = false;
        config.gui.pixmap_scale = 2.0;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert!(loaded.display.time_jd);
        assert!(!loaded.display.show_fps);
        assert_eq!(loaded.gui.pixmap_scale, 2.0);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.display.show_datetime);
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[display]\nshow_fov = false\n").expect("failed to write");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert!(!loaded.display.show_fov);
        assert!(loaded.display.show_datetime);
        assert_eq!(loaded.gui.font_size, defaults::DEFAULT_FONT_SIZE);
    }

    #[test]
    fn default_config_enables_all_fields() {
        let config = Config::default();
        assert!(config.display.show_datetime);
        assert!(config.display.show_location);
        assert!(config.display.show_fov);
        assert!(config.display.show_fps);
        assert!(!config.display.time_jd);
        assert!(!config.display.fov_dms);
    }
}
