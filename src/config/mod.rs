//! Configuration file management
//!
//! Loads TOML configuration files and provides font selection settings.
//! Default config path: ~/.config/fontsel/config.toml

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_FALLBACKS, DEFAULT_FAMILY, DEFAULT_FRAME_HEIGHT, DEFAULT_MONOSPACE_FAMILY,
    DEFAULT_ZOOM_PERCENT, STYLE_DEFAULT_REL_FONT_SIZE, SYSTEM_FONT_PATH,
};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font settings
    pub font: FontConfig,
    /// Output frame settings
    pub target: TargetConfig,
}

/// Font settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Default family spec (comma separated list allowed)
    pub family: String,
    /// Family spec for monospaced text
    pub monospace_family: String,
    /// File backing the default family when fontconfig is unavailable
    pub font_file: Option<String>,
    /// File backing the monospace family when fontconfig is unavailable
    pub monospace_font_file: Option<String>,
    /// Base directory for relative font file names
    pub font_dir: String,
    /// Families tried last, in order, for characters nothing else covers
    pub fallbacks: Vec<String>,
    /// Pixel size (0 = use relative_size)
    pub size: u32,
    /// Size in percent of the frame height
    pub relative_size: f32,
    /// Global zoom in percent
    pub scale: u32,
}

/// Output frame settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Frame height in pixels (relative sizes are taken from it)
    pub frame_height: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_string(),
            monospace_family: DEFAULT_MONOSPACE_FAMILY.to_string(),
            font_file: None,
            monospace_font_file: None,
            font_dir: SYSTEM_FONT_PATH.to_string(),
            fallbacks: DEFAULT_FALLBACKS.iter().map(|s| s.to_string()).collect(),
            size: 0,
            relative_size: STYLE_DEFAULT_REL_FONT_SIZE,
            scale: DEFAULT_ZOOM_PERCENT,
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            frame_height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/fontsel/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. FONTSEL_CONFIG environment variable
        if let Ok(path) = std::env::var("FONTSEL_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/fontsel/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("fontsel").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/fontsel/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration file
    ///
    /// Search order:
    /// 1. `$FONTSEL_CONFIG`
    /// 2. `~/.config/fontsel/config.toml`
    /// 3. `/etc/fontsel/config.toml`
    ///
    /// Falls back to built-in defaults when no file exists or it fails to parse
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Serialize as a TOML template
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write the default config to the user config directory
    pub fn write_default_config() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        let dir = config_dir.join("fontsel");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("config.toml");
        std::fs::write(&path, Self::default().to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.font.family, DEFAULT_FAMILY);
        assert_eq!(config.font.scale, 100);
        assert_eq!(config.font.size, 0);
        assert!(!config.font.fallbacks.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[font]\nfamily = \"Noto Sans, DejaVu Sans\"\nsize = 28\nfallbacks = [\"Unifont\"]\n"
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.font.family, "Noto Sans, DejaVu Sans");
        assert_eq!(config.font.size, 28);
        assert_eq!(config.font.fallbacks, ["Unifont"]);
        assert_eq!(config.font.monospace_family, DEFAULT_MONOSPACE_FAMILY);
        assert_eq!(config.target.frame_height, DEFAULT_FRAME_HEIGHT);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[font\nsize = ").unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_env_var_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[font]\nsize = 40\n").unwrap();

        std::env::set_var("FONTSEL_CONFIG", file.path());
        let path = Config::config_path();
        let config = Config::load();
        std::env::remove_var("FONTSEL_CONFIG");

        assert_eq!(path.as_deref(), Some(file.path()));
        assert_eq!(config.font.size, 40);
    }

    #[test]
    fn test_template_parses_back() {
        let template = Config::default().to_toml().unwrap();
        let config: Config = toml::from_str(&template).unwrap();
        assert_eq!(config.font.fallbacks, Config::default().font.fallbacks);
        assert_eq!(config.font.font_dir, SYSTEM_FONT_PATH);
    }
}
