//! Configuration for transient live panels.
//!
//! A panel's configuration starts from a named preset, optionally replaced by
//! an explicit base config (for example one loaded from a TOML file), and is
//! then adjusted per call with overrides. Every resolved config is validated
//! before any thread starts.

pub mod field;
mod validation;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};

use crate::feedback::LIVE_REFRESH_PER_SECOND;

/// Error type for panel configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `display_lines` exceeds `max_lines`.
    #[error("display_lines ({display_lines}) must not exceed max_lines ({max_lines})")]
    DisplayExceedsMax {
        /// Requested number of visible lines.
        display_lines: usize,
        /// Requested buffer capacity.
        max_lines: usize,
    },
    /// A count that must be positive was zero.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    /// A rate that must be a positive finite number was not.
    #[error("{field} must be a positive number, got {value}")]
    InvalidRate {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Unknown preset name.
    #[error("Unknown preset: {0} (expected default or streaming)")]
    UnknownPreset(String),
    /// Failed to read a config file.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse a config file.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Invalid `key=value` override.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PanelPreset {
    /// Short steps: 100 retained lines, 24 visible.
    #[default]
    Default,
    /// Long tool output: 200 retained lines, 28 visible.
    Streaming,
}

impl fmt::Display for PanelPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelPreset::Default => write!(f, "default"),
            PanelPreset::Streaming => write!(f, "streaming"),
        }
    }
}

impl FromStr for PanelPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(PanelPreset::Default),
            "streaming" => Ok(PanelPreset::Streaming),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

/// Configuration for one transient live panel session.
///
/// Immutable once the session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransientPanelConfig {
    /// Maximum number of lines retained in the buffer.
    pub max_lines: usize,
    /// Number of most recent lines shown in the panel.
    pub display_lines: usize,
    /// Redraws per second.
    pub refresh_per_second: f64,
    /// Spinner frames per second, independent of the refresh rate.
    pub animation_rate: f64,
    /// Status text shown until the caller sets one.
    pub default_status: String,
    /// Terminal rows kept free for title, borders, padding and status.
    pub reserve_lines: u16,
    /// Border style token, passed through to the renderer.
    pub border_style: String,
    /// Panel padding as (vertical, horizontal).
    pub padding: (u16, u16),
}

impl Default for TransientPanelConfig {
    fn default() -> Self {
        Self {
            max_lines: 100,
            display_lines: 24,
            refresh_per_second: LIVE_REFRESH_PER_SECOND,
            animation_rate: LIVE_REFRESH_PER_SECOND,
            default_status: "Running".to_string(),
            reserve_lines: 12,
            border_style: "dim".to_string(),
            padding: (0, 1),
        }
    }
}

impl TransientPanelConfig {
    /// Configuration for a named preset.
    pub fn preset(preset: PanelPreset) -> Self {
        match preset {
            PanelPreset::Default => Self::default(),
            PanelPreset::Streaming => Self {
                max_lines: 200,
                display_lines: 28,
                ..Self::default()
            },
        }
    }

    /// Load a config from a TOML file and validate it.
    ///
    /// Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Interval between redraws.
    ///
    /// Rates too small to represent saturate to the longest duration.
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::try_from_secs_f64(1.0 / self.refresh_per_second)
            .unwrap_or(std::time::Duration::MAX)
    }

    /// Number of lines to show given the terminal height.
    ///
    /// Caps `display_lines` so the panel plus its reserved rows fits, but
    /// never below one line.
    pub fn effective_display_lines(&self, terminal_rows: u16) -> usize {
        let available = usize::from(terminal_rows.saturating_sub(self.reserve_lines)).max(1);
        self.display_lines.min(available)
    }

    /// Apply overrides, returning a new config. `None` fields are ignored.
    pub fn with_overrides(&self, overrides: &PanelOverrides) -> Self {
        let mut cfg = self.clone();
        if let Some(v) = overrides.max_lines {
            cfg.max_lines = v;
        }
        if let Some(v) = overrides.display_lines {
            cfg.display_lines = v;
        }
        if let Some(v) = overrides.refresh_per_second {
            cfg.refresh_per_second = v;
        }
        if let Some(v) = overrides.animation_rate {
            cfg.animation_rate = v;
        }
        if let Some(ref v) = overrides.default_status {
            cfg.default_status = v.clone();
        }
        if let Some(ref v) = overrides.border_style {
            cfg.border_style = v.clone();
        }
        cfg
    }
}

/// Per-call overrides on top of a preset or base config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelOverrides {
    /// Override for `max_lines`.
    pub max_lines: Option<usize>,
    /// Override for `display_lines`.
    pub display_lines: Option<usize>,
    /// Override for `refresh_per_second`.
    pub refresh_per_second: Option<f64>,
    /// Override for `animation_rate`.
    pub animation_rate: Option<f64>,
    /// Override for `default_status`.
    pub default_status: Option<String>,
    /// Override for `border_style`.
    pub border_style: Option<String>,
}

/// Resolve a panel config from a preset, an optional explicit base, and overrides.
///
/// An explicit base replaces the preset entirely. The result is validated.
pub fn resolve_panel_config(
    preset: PanelPreset,
    base: Option<&TransientPanelConfig>,
    overrides: &PanelOverrides,
) -> Result<TransientPanelConfig, ConfigError> {
    let base = match base {
        Some(cfg) => cfg.clone(),
        None => TransientPanelConfig::preset(preset),
    };
    let resolved = base.with_overrides(overrides);
    resolved.validate()?;
    Ok(resolved)
}
