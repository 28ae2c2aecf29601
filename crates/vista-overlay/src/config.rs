//! Layered overlay configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variable: `VISTA_START_DIR`
//! 2. Project-local: `.vista/config.toml`
//! 3. Global: `~/.vista/config.toml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vista_core::{Color, Result, Size, VistaError};

/// Environment variable overriding the browser's initial directory
pub const START_DIR_ENV: &str = "VISTA_START_DIR";

/// Directory browser panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_browser_width")]
    pub width: f32,
    #[serde(default = "default_browser_height")]
    pub height: f32,
    /// List dot-files
    #[serde(default = "default_true")]
    pub show_hidden: bool,
    /// Initial directory; the working directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            width: default_browser_width(),
            height: default_browser_height(),
            show_hidden: true,
            start_dir: None,
        }
    }
}

impl BrowserConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Alert dialog panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogConfig {
    #[serde(default = "default_dialog_width")]
    pub width: f32,
    #[serde(default = "default_dialog_height")]
    pub height: f32,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            width: default_dialog_width(),
            height: default_dialog_height(),
        }
    }
}

impl DialogConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Frame and spacing shared by both panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default = "default_spacing")]
    pub padding: f32,
    #[serde(default = "default_border")]
    pub border: f32,
    #[serde(default = "default_background")]
    pub background: [f32; 4],
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            padding: default_spacing(),
            border: default_border(),
            background: default_background(),
        }
    }
}

impl StyleConfig {
    pub fn background_color(&self) -> Color {
        Color::from_array(self.background)
    }
}

fn default_true() -> bool {
    true
}
fn default_browser_width() -> f32 {
    400.0
}
fn default_browser_height() -> f32 {
    300.0
}
fn default_dialog_width() -> f32 {
    440.0
}
fn default_dialog_height() -> f32 {
    100.0
}
fn default_spacing() -> f32 {
    4.0
}
fn default_border() -> f32 {
    2.0
}
fn default_background() -> [f32; 4] {
    Color::WHITE.to_array()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

impl OverlayConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = OverlayConfig::default();

        // Layer 1: Global config (~/.vista/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = Self::load_file(&global_path)?;
            }
        }

        // Layer 2: Project-local config (.vista/config.toml)
        let local_path = PathBuf::from(".vista/config.toml");
        if local_path.exists() {
            let local = Self::read_table(&local_path)?;
            config = Self::merge(config, local)?;
        }

        // Layer 3: Environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Load config from a specific file path only, then apply env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: OverlayConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Path of the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".vista").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VistaError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VistaError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(content.parse::<toml::Table>()?)
    }

    /// Overlay only the keys present in `layer` onto `base`
    fn merge(base: Self, layer: toml::Table) -> Result<Self> {
        let mut merged = match toml::Value::try_from(&base)? {
            toml::Value::Table(table) => table,
            _ => return Err(VistaError::ConfigError("config is not a table".to_string())),
        };
        for (section, value) in layer {
            if let (Some(toml::Value::Table(existing)), toml::Value::Table(overrides)) =
                (merged.get_mut(&section), &value)
            {
                for (key, v) in overrides {
                    existing.insert(key.clone(), v.clone());
                }
                continue;
            }
            merged.insert(section, value);
        }
        let config: OverlayConfig = toml::Value::Table(merged).try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(START_DIR_ENV) {
            if !dir.is_empty() {
                self.browser.start_dir = Some(PathBuf::from(dir));
            }
        }
    }

    /// Reject sizes no panel can be built with
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("browser", self.browser.width, self.browser.height),
            ("dialog", self.dialog.width, self.dialog.height),
        ];
        for (name, w, h) in sizes {
            if !(w > 0.0 && h > 0.0) {
                return Err(VistaError::ConfigError(format!(
                    "{} size must be positive, got {}x{}",
                    name, w, h
                )));
            }
        }
        if self.style.spacing < 0.0 || self.style.padding < 0.0 || self.style.border < 0.0 {
            return Err(VistaError::ConfigError(
                "style spacing, padding and border must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vista_config_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.browser.size(), Size::new(400.0, 300.0));
        assert_eq!(config.dialog.size(), Size::new(440.0, 100.0));
        assert!(config.browser.show_hidden);
        assert_eq!(config.style.spacing, 4.0);
        assert_eq!(config.style.border, 2.0);
        assert_eq!(config.style.background_color(), Color::WHITE);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = OverlayConfig::from_toml_str(
            r#"
[browser]
width = 640
show_hidden = false

[style]
background = [0.9, 0.9, 0.9, 1.0]
"#,
        )
        .unwrap();
        assert_eq!(config.browser.width, 640.0);
        assert_eq!(config.browser.height, 300.0);
        assert!(!config.browser.show_hidden);
        assert_eq!(config.dialog, DialogConfig::default());
        assert_eq!(config.style.background, [0.9, 0.9, 0.9, 1.0]);
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = OverlayConfig::from_toml_str("[dialog]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, VistaError::ConfigError(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = OverlayConfig::from_toml_str("[browser\nwidth = 1").unwrap_err();
        assert!(matches!(err, VistaError::TomlParseError(_)));
    }

    #[test]
    fn test_merge_only_overrides_present_keys() {
        let mut base = OverlayConfig::default();
        base.browser.width = 500.0;
        base.dialog.height = 120.0;

        let layer: toml::Table = "[browser]\nheight = 200\n".parse().unwrap();
        let merged = OverlayConfig::merge(base, layer).unwrap();
        assert_eq!(merged.browser.width, 500.0);
        assert_eq!(merged.browser.height, 200.0);
        assert_eq!(merged.dialog.height, 120.0);
    }

    #[test]
    fn test_load_file_and_roundtrip_text() {
        let dir = temp_dir();
        let path = dir.join("config.toml");
        fs::write(&path, "[browser]\nstart_dir = \"/srv/models\"\n").unwrap();

        let config = OverlayConfig::load_file(&path).unwrap();
        assert_eq!(config.browser.start_dir, Some(PathBuf::from("/srv/models")));

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("start_dir"));
        assert_eq!(OverlayConfig::from_toml_str(&text).unwrap(), config);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = OverlayConfig::load_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, VistaError::ConfigError(_)));
    }
}
