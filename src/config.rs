use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::view::SortOrder;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Which layout the dashboard uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Pick by window width
    #[default]
    Auto,
    Desktop,
    Mobile,
}

impl LayoutMode {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutMode::Auto => "Auto",
            LayoutMode::Desktop => "Desktop",
            LayoutMode::Mobile => "Mobile",
        }
    }
}

impl std::str::FromStr for LayoutMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(LayoutMode::Auto),
            "desktop" => Ok(LayoutMode::Desktop),
            "mobile" => Ok(LayoutMode::Mobile),
            _ => anyhow::bail!("Unknown layout: {} (expected auto, desktop or mobile)", s),
        }
    }
}

/// Appearance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Force dark (true) or light (false); unset follows the system theme
    #[serde(default)]
    pub dark_mode: Option<bool>,
    #[serde(default)]
    pub layout: LayoutMode,
    /// Window widths at or below this use the mobile layout
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint: f32,
    /// Sort order the chapter list starts with
    #[serde(default)]
    pub default_sort: SortOrder,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dark_mode: None,
            layout: LayoutMode::Auto,
            mobile_breakpoint: default_breakpoint(),
            default_sort: SortOrder::Desc,
        }
    }
}

fn default_breakpoint() -> f32 {
    768.0
}

/// Where chapters come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; unset uses the built-in catalog
    #[serde(default)]
    pub file: Option<String>,
    /// Simulated fetch latency in milliseconds
    #[serde(default = "default_fetch_delay")]
    pub fetch_delay_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file: None,
            fetch_delay_ms: default_fetch_delay(),
        }
    }
}

fn default_fetch_delay() -> u64 {
    1000
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "pyq", "PyqChapters")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration, falling back to defaults when the file is unreadable
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                tracing::warn!("Failed to locate config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Like [`Config::load_from`], but a corrupt file yields defaults
    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load configuration from a specific file, defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Read a value by dotted key, e.g. "display.layout"
    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["display", "dark_mode"] => Ok(self
                .display
                .dark_mode
                .map(|dark| dark.to_string())
                .unwrap_or_else(|| "system".to_string())),
            ["display", "layout"] => Ok(self.display.layout.name().to_lowercase()),
            ["display", "mobile_breakpoint"] => Ok(self.display.mobile_breakpoint.to_string()),
            ["display", "default_sort"] => Ok(self.display.default_sort.as_str().to_string()),
            ["catalog", "file"] => Ok(self
                .catalog
                .file
                .clone()
                .unwrap_or_else(|| "<embedded>".to_string())),
            ["catalog", "fetch_delay_ms"] => Ok(self.catalog.fetch_delay_ms.to_string()),
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
    }

    /// Set a value by dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["display", "dark_mode"] => {
                self.display.dark_mode = match value {
                    "system" => None,
                    other => Some(other.parse()?),
                };
            }
            ["display", "layout"] => {
                self.display.layout = value.parse()?;
            }
            ["display", "mobile_breakpoint"] => {
                let breakpoint: f32 = value.parse()?;
                if !breakpoint.is_finite() || breakpoint <= 0.0 {
                    anyhow::bail!("Breakpoint must be a positive width: {}", value);
                }
                self.display.mobile_breakpoint = breakpoint;
            }
            ["display", "default_sort"] => {
                self.display.default_sort = value.parse().map_err(anyhow::Error::msg)?;
            }
            ["catalog", "file"] => {
                self.catalog.file = match value {
                    "" | "<embedded>" => None,
                    path => Some(path.to_string()),
                };
            }
            ["catalog", "fetch_delay_ms"] => {
                self.catalog.fetch_delay_ms = value.parse()?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }

        Ok(())
    }
}
