//! tpanel - transient live panels for long-running terminal work.
//!
//! A panel shows a bounded tail of output lines and an animated status line
//! while a task runs on a worker thread, then erases itself so only a short
//! summary stays in scrollback.
//!
//! The core lives in [`panel`]; [`config`], [`feedback`] and [`style`] hold
//! the settings, spinner clock and output helpers it builds on. The `tpanel`
//! binary in [`cli`] wraps an arbitrary command in a panel.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod feedback;
pub mod panel;
pub mod style;

// Re-export key types for convenience
pub use config::{
    resolve_panel_config, ConfigError, PanelOverrides, PanelPreset, TransientPanelConfig,
};
pub use panel::{transient_live_panel, LineBuffer, PanelError, PanelState, TaskRunner};
