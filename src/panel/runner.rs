//! Task runner: worker thread plus fixed-rate render loop.
//!
//! `run_task` starts the caller's closure on a scoped worker thread while the
//! calling thread redraws the panel at the configured refresh rate. When the
//! worker exits the panel is drawn one last time, cleared, and only then is
//! the worker's result returned (or its panic resumed).

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use parking_lot::Mutex;

use super::error::{PanelError, RenderError, RunnerPhase};
use super::hook::{self, HeldPanic};
use super::render::{PanelFrame, PanelRenderer};
use super::state::PanelState;
use crate::config::{ConfigError, TransientPanelConfig};
use crate::feedback::{current_frame, monotonic_secs, SPINNER_BRAILLE};

/// Owns one panel session: its state, config and renderer.
///
/// The runner is the caller's handle for the session. `append` and
/// `set_status` may be called from any thread, including from inside the
/// task passed to `run_task`.
pub struct TaskRunner<R: PanelRenderer> {
    state: PanelState,
    config: TransientPanelConfig,
    renderer: Mutex<R>,
    phase: Mutex<RunnerPhase>,
    hold_panic_reports: bool,
}

impl<R: PanelRenderer> TaskRunner<R> {
    /// Create an idle runner. Fails if `config` is invalid.
    ///
    /// The visible window is further capped by the renderer's row limit.
    pub fn new(
        title: impl Into<String>,
        config: TransientPanelConfig,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let display_lines = match renderer.visible_rows() {
            Some(rows) => config.display_lines.min(rows.max(1)),
            None => config.display_lines,
        };
        let state = PanelState::new(
            title,
            config.max_lines,
            display_lines,
            config.default_status.clone(),
        );
        Ok(Self {
            state,
            config,
            renderer: Mutex::new(renderer),
            phase: Mutex::new(RunnerPhase::Idle),
            hold_panic_reports: false,
        })
    }

    /// Hold back the panic hook's report for a panicking task until the
    /// panel has been cleared, then print it to stderr.
    ///
    /// Off by default: the installed hook reports the panic as it happens,
    /// which can draw over the live panel.
    pub fn hold_panic_reports(mut self, hold: bool) -> Self {
        self.hold_panic_reports = hold;
        self
    }

    /// Append a line of output to the panel.
    ///
    /// Accepted in any phase; after teardown it has no visible effect.
    pub fn append(&self, line: impl Into<String>) {
        self.state.append_line(line);
    }

    /// Replace the status line text.
    pub fn set_status(&self, text: impl Into<String>) {
        self.state.set_status(text);
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunnerPhase {
        *self.phase.lock()
    }

    /// Panel state.
    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Session config.
    pub fn config(&self) -> &TransientPanelConfig {
        &self.config
    }

    /// Consume the runner, returning its renderer.
    pub fn into_renderer(self) -> R {
        self.renderer.into_inner()
    }

    /// Run `task` on a worker thread while the panel is shown.
    ///
    /// Returns the task's value once the panel has been cleared. If the task
    /// panics, the panel is cleared first and the original panic payload is
    /// then resumed on this thread. Render failures are logged and never
    /// affect the outcome.
    ///
    /// The panic hook still runs on the worker thread at the moment of the
    /// panic, so its `thread 'panel-worker' panicked at ...` report is written
    /// while the panel is on screen. Use [`TaskRunner::hold_panic_reports`]
    /// to print it after teardown instead.
    ///
    /// May be called once per runner; later calls, and calls made while the
    /// task is running, return [`PanelError::InvalidState`].
    pub fn run_task<F, T>(&self, task: F) -> Result<T, PanelError>
    where
        F: FnOnce() -> T + Send,
        T: Send,
    {
        self.begin("run_task")?;
        tracing::debug!(title = self.state.title(), "panel session started");
        let interval = self.config.refresh_interval();
        let hold = self.hold_panic_reports;
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let joined: Result<thread::Result<Result<T, HeldPanic>>, PanelError> =
            thread::scope(|scope| {
                let worker = thread::Builder::new()
                    .name("panel-worker".into())
                    .spawn_scoped(scope, move || {
                        // Dropped when the task returns or unwinds, waking the render loop.
                        let _done = done_tx;
                        if hold {
                            hook::run_held(task)
                        } else {
                            Ok(task())
                        }
                    })
                    .map_err(PanelError::Spawn)?;

                let mut session = RenderSession::new(self);
                session.tick(false);
                loop {
                    match done_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => session.tick(false),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }

                let outcome = worker.join();
                self.set_phase(if matches!(outcome, Ok(Ok(_))) {
                    RunnerPhase::Succeeded
                } else {
                    RunnerPhase::Failed
                });
                session.tick(true);
                session.close();
                Ok(outcome)
            });

        self.set_phase(RunnerPhase::Closed);
        let payload = match joined? {
            Ok(Ok(value)) => {
                tracing::debug!(title = self.state.title(), "panel session finished");
                return Ok(value);
            }
            Ok(Err(held)) => {
                for report in &held.reports {
                    eprintln!("{report}");
                }
                held.payload
            }
            Err(payload) => payload,
        };
        tracing::debug!(
            title = self.state.title(),
            "panel task panicked, resuming after teardown"
        );
        panic::resume_unwind(payload)
    }

    fn begin(&self, operation: &'static str) -> Result<(), PanelError> {
        let mut phase = self.phase.lock();
        match *phase {
            RunnerPhase::Idle => {
                *phase = RunnerPhase::Running;
                Ok(())
            }
            other => Err(PanelError::InvalidState {
                operation,
                phase: other,
            }),
        }
    }

    fn set_phase(&self, phase: RunnerPhase) {
        *self.phase.lock() = phase;
    }
}

/// Render-loop bookkeeping for one session. Clears the panel on drop.
struct RenderSession<'a, R: PanelRenderer> {
    runner: &'a TaskRunner<R>,
    last_generation: Option<u64>,
    last_frame: Option<usize>,
    failures: usize,
    closed: bool,
}

impl<'a, R: PanelRenderer> RenderSession<'a, R> {
    fn new(runner: &'a TaskRunner<R>) -> Self {
        Self {
            runner,
            last_generation: None,
            last_frame: None,
            failures: 0,
            closed: false,
        }
    }

    /// Draw the current state. Skipped when neither the state nor the
    /// spinner frame changed since the last draw, unless `force` is set.
    fn tick(&mut self, force: bool) {
        let runner = self.runner;
        let config = &runner.config;
        let snapshot = runner.state.snapshot();
        let frame_index = current_frame(
            monotonic_secs(),
            config.animation_rate,
            SPINNER_BRAILLE.len(),
        );
        if let Some(last) = self.last_generation {
            debug_assert!(snapshot.generation >= last, "snapshot went backwards");
        }
        if !force
            && self.last_generation == Some(snapshot.generation)
            && self.last_frame == Some(frame_index)
        {
            return;
        }

        let frame = PanelFrame {
            title: snapshot.title,
            lines: &snapshot.lines,
            status: &snapshot.status,
            spinner: SPINNER_BRAILLE[frame_index],
            border_style: &config.border_style,
            padding: config.padding,
        };
        let result = {
            let mut renderer = runner.renderer.lock();
            guarded(|| renderer.render(&frame))
        };
        if let Err(err) = result {
            self.record_failure(&err);
        }
        self.last_generation = Some(snapshot.generation);
        self.last_frame = Some(frame_index);
    }

    /// Clear the panel. Only the first call reaches the renderer.
    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let result = {
            let mut renderer = self.runner.renderer.lock();
            guarded(|| renderer.clear())
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to clear panel");
        }
    }

    fn record_failure(&mut self, err: &RenderError) {
        self.failures += 1;
        if self.failures == 1 {
            tracing::warn!(error = %err, "panel render failed");
        } else {
            tracing::debug!(error = %err, failures = self.failures, "panel render failed");
        }
    }
}

impl<R: PanelRenderer> Drop for RenderSession<'_, R> {
    fn drop(&mut self) {
        self.close();
    }
}

fn guarded(op: impl FnOnce() -> Result<(), RenderError>) -> Result<(), RenderError> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or(Err(RenderError::Panicked))
}
