//! User configuration, read from a TOML file.
//!
//! Every field has a default that reproduces the stock shell, so an empty
//! file (or no file at all) is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub chrome: ChromeSettings,
    pub snapping: SnappingSettings,
    pub device: DeviceSettings,
    pub responsive: ResponsiveSettings,
    pub interaction: InteractionSettings,
    pub menu_bar: MenuBarSettings,
    pub apps: Vec<AppConfig>,
}

/// Fixed-height shell surfaces that windows must not cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromeSettings {
    pub menu_bar_height: f64,
    pub dock_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnappingSettings {
    /// Edge margin that arms a snap zone on full-size viewports.
    pub threshold: f64,
    /// Edge margin on constrained (tablet-class) viewports.
    pub constrained_threshold: f64,
    /// How close a drop must land to the centered target to be pulled onto it.
    pub magnet_tolerance: f64,
    /// Width of the centered target as a fraction of the viewport width.
    pub magnet_width_ratio: f64,
}

/// Width breakpoints for device classification. Widths below
/// `compact_max_width` are compact, widths below `constrained_max_width`
/// are constrained, everything else is full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceSettings {
    pub compact_max_width: f64,
    pub constrained_max_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResponsiveSettings {
    pub settle_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionSettings {
    pub resize_anchoring: ResizeAnchoring,
    pub escape_cancels_gesture: bool,
    pub cascade_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuBarSettings {
    /// Label shown when no window is frontmost.
    pub idle_title: String,
}

/// How west/north resize handles move the window origin once the size hits
/// its minimum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResizeAnchoring {
    /// The origin follows the raw pointer delta even after the size is
    /// clamped, so the edge drifts away from the cursor.
    #[default]
    Unclamped,
    /// The origin is derived from the clamped size; the opposite edge stays put.
    Clamped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub id: String,
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            menu_bar_height: 25.0,
            dock_height: 60.0,
        }
    }
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            constrained_threshold: 30.0,
            magnet_tolerance: 50.0,
            magnet_width_ratio: 0.9,
        }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            compact_max_width: 640.0,
            constrained_max_width: 1024.0,
        }
    }
}

impl Default for ResponsiveSettings {
    fn default() -> Self { Self { settle_delay_ms: 100 } }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            resize_anchoring: ResizeAnchoring::default(),
            escape_cancels_gesture: false,
            cascade_offset: 30.0,
        }
    }
}

impl Default for MenuBarSettings {
    fn default() -> Self { Self { idle_title: "Finder".to_string() } }
}

impl AppConfig {
    fn new(id: &str, title: &str, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            width,
            height,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chrome: ChromeSettings::default(),
            snapping: SnappingSettings::default(),
            device: DeviceSettings::default(),
            responsive: ResponsiveSettings::default(),
            interaction: InteractionSettings::default(),
            menu_bar: MenuBarSettings::default(),
            apps: default_apps(),
        }
    }
}

fn default_apps() -> Vec<AppConfig> {
    vec![
        AppConfig::new("finder", "Finder", 900.0, 600.0),
        AppConfig::new("safari", "Safari", 1000.0, 700.0),
        AppConfig::new("terminal", "Terminal", 800.0, 500.0),
        AppConfig::new("vscode", "VS Code", 1200.0, 800.0),
        AppConfig::new("messages", "Messages", 800.0, 600.0),
        AppConfig::new("mail", "Mail", 900.0, 700.0),
        AppConfig::new("calculator", "Calculator", 320.0, 500.0),
        AppConfig::new("notes", "Notes", 800.0, 600.0),
        AppConfig::new("photobooth", "Photo Booth", 900.0, 700.0),
        AppConfig::new("beatmaker", "Beat Maker", 1000.0, 800.0),
        AppConfig::new("wallpapers", "Wallpapers", 1000.0, 700.0),
        AppConfig::new("doom", "DOOM", 1024.0, 768.0),
    ]
}

impl ResponsiveSettings {
    pub fn settle_delay(&self) -> Duration { Duration::from_millis(self.settle_delay_ms) }
}

impl ChromeSettings {
    /// Vertical space left for windows between the menu bar and the dock.
    pub fn available_height(&self, viewport_height: f64) -> f64 {
        (viewport_height - self.menu_bar_height - self.dock_height).max(0.0)
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glass").join("glass.toml"))
    }

    pub fn read(path: &Path) -> Result<Config, ConfigError> {
        let buf = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(?path, "Loaded config file");
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(buf)?;
        config.sanitize();
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> { toml::to_string(self) }

    pub fn app(&self, id: &str) -> Option<&AppConfig> { self.apps.iter().find(|app| app.id == id) }

    fn sanitize(&mut self) {
        let defaults = Config::default();

        for (name, value, fallback) in [
            (
                "chrome.menu_bar_height",
                &mut self.chrome.menu_bar_height,
                defaults.chrome.menu_bar_height,
            ),
            (
                "chrome.dock_height",
                &mut self.chrome.dock_height,
                defaults.chrome.dock_height,
            ),
            (
                "snapping.threshold",
                &mut self.snapping.threshold,
                defaults.snapping.threshold,
            ),
            (
                "snapping.constrained_threshold",
                &mut self.snapping.constrained_threshold,
                defaults.snapping.constrained_threshold,
            ),
            (
                "snapping.magnet_tolerance",
                &mut self.snapping.magnet_tolerance,
                defaults.snapping.magnet_tolerance,
            ),
        ] {
            if !value.is_finite() || *value < 0.0 {
                warn!("{name} must be a non-negative number, using {fallback}");
                *value = fallback;
            }
        }

        let ratio = self.snapping.magnet_width_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            warn!(
                "snapping.magnet_width_ratio must be in (0, 1], using {}",
                defaults.snapping.magnet_width_ratio
            );
            self.snapping.magnet_width_ratio = defaults.snapping.magnet_width_ratio;
        }

        if self.device.constrained_max_width < self.device.compact_max_width {
            warn!(
                "device.constrained_max_width ({}) is below device.compact_max_width ({}); \
                 constrained class disabled",
                self.device.constrained_max_width, self.device.compact_max_width
            );
            self.device.constrained_max_width = self.device.compact_max_width;
        }

        let mut seen = crate::common::collections::HashSet::default();
        self.apps.retain(|app| {
            let fresh = seen.insert(app.id.clone());
            if !fresh {
                warn!(id = %app.id, "Duplicate app entry ignored");
            }
            fresh
        });
    }
}
