//! Configuration management for convotui.
//!
//! Handles persistence and loading of user preferences: title-edit behavior,
//! the message budget driving the per-row progress bar, and layout settings.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Title editing preferences
    #[serde(default)]
    pub editing: EditingConfig,

    /// Message budget used as the denominator of the per-row progress bar.
    /// Zero disables the bar.
    #[serde(default = "default_max_chat_messages")]
    pub max_chat_messages: u32,

    /// Whether rows show a leading status glyph
    #[serde(default = "default_true")]
    pub show_symbols: bool,

    /// Layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_max_chat_messages() -> u32 {
    40
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editing: EditingConfig::default(),
            max_chat_messages: default_max_chat_messages(),
            show_symbols: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;

        Ok(config_dir.join("convotui").join("config.toml"))
    }
}

/// Title editing preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditingConfig {
    /// When true, plain Enter inserts a newline while editing a title and
    /// Shift/Alt+Enter commits; when false the combinations swap.
    #[serde(default)]
    pub enter_is_newline: bool,

    /// Whether double-clicking a row title opens the inline editor. When
    /// disabled, only the explicit rename key does.
    #[serde(default = "default_true")]
    pub double_click_to_edit: bool,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            enter_is_newline: false,
            double_click_to_edit: true,
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Drawer width as percentage (10-50%)
    #[serde(default = "default_drawer_width")]
    pub drawer_width_pct: u8,

    /// Drawer position (left or right)
    #[serde(default)]
    pub drawer_position: DrawerPosition,

    /// When pinned, activating a conversation leaves the drawer open;
    /// unpinned, activation closes it (the original menu behavior).
    #[serde(default = "default_true")]
    pub drawer_pinned: bool,

    /// Whether the drawer is currently minimized
    #[serde(default)]
    pub drawer_minimized: bool,
}

fn default_drawer_width() -> u8 {
    30
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            drawer_width_pct: 30,
            drawer_position: DrawerPosition::Left,
            drawer_pinned: true,
            drawer_minimized: false,
        }
    }
}

impl LayoutConfig {
    /// Validate and clamp drawer width to valid range (10-50%)
    pub fn validate(&mut self) {
        self.drawer_width_pct = self.drawer_width_pct.clamp(10, 50);
    }
}

/// Drawer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerPosition {
    #[default]
    Left,
    Right,
}

impl DrawerPosition {
    /// Toggle between left and right
    pub fn toggle(&self) -> Self {
        match self {
            DrawerPosition::Left => DrawerPosition::Right,
            DrawerPosition::Right => DrawerPosition::Left,
        }
    }
}
