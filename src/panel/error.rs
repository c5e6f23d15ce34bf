//! Error types for panel sessions.

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// Lifecycle phase of a task runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerPhase {
    /// Constructed; no threads running.
    Idle,
    /// Worker running, render loop active.
    Running,
    /// Worker returned; panel being torn down.
    Succeeded,
    /// Worker panicked; panel being torn down.
    Failed,
    /// Panel torn down; the session is over.
    Closed,
}

impl fmt::Display for RunnerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunnerPhase::Idle => "idle",
            RunnerPhase::Running => "running",
            RunnerPhase::Succeeded => "succeeded",
            RunnerPhase::Failed => "failed",
            RunnerPhase::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Errors reported by a panel session.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// An operation was attempted outside the session's valid window,
    /// such as a second `run_task`.
    #[error("cannot {operation} while the panel is {phase}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// Phase the runner was in.
        phase: RunnerPhase,
    },
    /// The panel configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Failure inside a rendering collaborator.
///
/// Render errors are logged and never override the worker's outcome.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Terminal I/O failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The renderer panicked.
    #[error("renderer panicked")]
    Panicked,
    /// The terminal could not be set up for drawing.
    #[error("terminal viewport unavailable")]
    Unavailable,
    /// Renderer-specific failure.
    #[error("{0}")]
    Message(String),
}
