//! Transient live panel.
//!
//! Shows a scrolling tail of output lines and an animated status line while a
//! task runs on a worker thread, then removes the panel entirely so only what
//! the caller prints afterwards remains.
//!
//! # Example
//!
//! ```no_run
//! use tpanel::config::{PanelOverrides, PanelPreset};
//! use tpanel::panel::transient_live_panel;
//!
//! let total = transient_live_panel("Fetching", PanelPreset::Streaming, &PanelOverrides::default(), |panel| {
//!     panel.run_task(|| {
//!         for i in 0..100 {
//!             panel.set_status(format!("Fetching page {i}"));
//!             panel.append(format!("page {i}: ok"));
//!         }
//!         100
//!     })
//! })??;
//! println!("Fetched {total} pages");
//! # Ok::<(), tpanel::panel::PanelError>(())
//! ```

mod buffer;
mod error;
mod hook;
mod render;
mod runner;
mod state;

pub use buffer::LineBuffer;
pub use error::{PanelError, RenderError, RunnerPhase};
pub use render::{NullRenderer, PanelFrame, PanelRenderer, StdoutRenderer, TerminalRenderer};
pub use runner::TaskRunner;
pub use state::{PanelSnapshot, PanelState};

use crate::config::{resolve_panel_config, PanelOverrides, PanelPreset, TransientPanelConfig};

/// Open a panel session on stdout and hand it to `body`.
///
/// The config comes from `preset` plus `overrides` and is validated before
/// anything is drawn. Nothing is drawn until `body` calls `run_task`, and the
/// panel is always cleared before `run_task` returns or resumes a panic.
/// When stdout is not a terminal the session runs without drawing anything.
pub fn transient_live_panel<F, T>(
    title: &str,
    preset: PanelPreset,
    overrides: &PanelOverrides,
    body: F,
) -> Result<T, PanelError>
where
    F: FnOnce(&TaskRunner<StdoutRenderer>) -> T,
{
    let config = resolve_panel_config(preset, None, overrides)?;
    let renderer = StdoutRenderer::detect(&config);
    with_panel(title, config, renderer, body)
}

/// Open a panel session with an explicit config and renderer.
pub fn with_panel<R, F, T>(
    title: &str,
    config: TransientPanelConfig,
    renderer: R,
    body: F,
) -> Result<T, PanelError>
where
    R: PanelRenderer,
    F: FnOnce(&TaskRunner<R>) -> T,
{
    let panel = TaskRunner::new(title, config, renderer)?;
    Ok(body(&panel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_with_panel_runs_body() {
        let result = with_panel("t", TransientPanelConfig::default(), NullRenderer, |panel| {
            panel.run_task(|| {
                panel.append("hello");
                panel.state().line_count()
            })
        })
        .unwrap()
        .unwrap();
        assert_eq!(result, 1);
    }

    #[test]
    fn test_transient_live_panel_rejects_bad_overrides() {
        let overrides = PanelOverrides {
            display_lines: Some(30),
            max_lines: Some(20),
            ..Default::default()
        };
        let mut body_ran = false;
        let result = transient_live_panel("t", PanelPreset::Default, &overrides, |_| {
            body_ran = true;
        });
        assert!(matches!(
            result,
            Err(PanelError::Config(ConfigError::DisplayExceedsMax { .. }))
        ));
        assert!(!body_ran);
    }

    #[test]
    fn test_redirected_stdout_session_finishes_promptly() {
        let config = TransientPanelConfig::preset(PanelPreset::Default);
        let renderer = StdoutRenderer::new(&config, false);
        let started = Instant::now();
        let value = with_panel("redirected", config, renderer, |panel| {
            panel.run_task(|| {
                thread::sleep(Duration::from_millis(100));
                panel.append("\x1b[32mok\x1b[0m");
                7
            })
        })
        .unwrap()
        .unwrap();
        assert_eq!(value, 7);
        assert!(
            started.elapsed() < Duration::from_millis(600),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn test_body_without_run_task_draws_nothing() {
        let value = with_panel("idle", TransientPanelConfig::default(), NullRenderer, |panel| {
            panel.append("queued before run");
            panel.phase()
        })
        .unwrap();
        assert_eq!(value, RunnerPhase::Idle);
    }
}
