//! Inline status spinner for showing progress during long-running operations.
//!
//! The spinner runs in a background thread and redraws a single terminal line
//! with an animated frame and message. Frames come from the frame clock, so
//! a spinner and a live panel running side by side stay in step.

use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossterm::style::Stylize;
use crossterm::{cursor, queue, terminal};
use parking_lot::Mutex;

use super::art::{braille_spinner_for_status, spinner, SpinnerDef, SPINNER_BRAILLE};
use super::clock::{frame_now, tick_duration, LIVE_REFRESH_PER_SECOND};

/// A single-line status indicator.
///
/// Call `stop()` (or one of its variants) to clear it; dropping the spinner
/// also clears the line.
///
/// # Example
///
/// ```ignore
/// let spinner = StatusSpinner::start("Loading...");
/// // ... do work ...
/// spinner.stop_with_success("Loaded");
/// ```
pub struct StatusSpinner {
    message: Arc<Mutex<String>>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StatusSpinner {
    /// Start a braille spinner with the given message.
    pub fn start(message: &str) -> Self {
        Self::with_spinner(braille_spinner_for_status(), message)
    }

    /// Start a spinner using a registered spinner name.
    ///
    /// Unknown names fall back to the braille frames.
    pub fn with_spinner(name: &str, message: &str) -> Self {
        Self::spawn(resolve(name), message, io::stdout())
    }

    fn spawn(def: SpinnerDef, message: &str, mut out: impl Write + Send + 'static) -> Self {
        let message = Arc::new(Mutex::new(message.to_string()));
        let shared = Arc::clone(&message);
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("status-spinner".into())
            .spawn(move || {
                let rate = def.rate();
                let interval = tick_duration(rate);
                loop {
                    let frame = def.frame(frame_now(rate, def.frames.len()));
                    let text = shared.lock().clone();
                    let _ = draw_line(&mut out, frame, &text);
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                let _ = clear_line(&mut out);
            })
            .map_err(|e| tracing::warn!(error = %e, "failed to start status spinner"))
            .ok();

        Self {
            message,
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    /// Replace the message shown next to the spinner.
    pub fn set_message(&self, message: &str) {
        *self.message.lock() = message.to_string();
    }

    /// Current message.
    pub fn message(&self) -> String {
        self.message.lock().clone()
    }

    /// Stop the spinner and clear the line.
    pub fn stop(mut self) {
        self.halt();
    }

    /// Stop the spinner and replace it with a success message.
    pub fn stop_with_success(mut self, message: &str) {
        self.halt();
        println!("{} {}", "✓".green(), message);
    }

    /// Stop the spinner and replace it with an error message.
    pub fn stop_with_error(mut self, message: &str) {
        self.halt();
        println!("{} {}", "✗".red(), message);
    }

    fn halt(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for StatusSpinner {
    fn drop(&mut self) {
        self.halt();
    }
}

fn resolve(name: &str) -> SpinnerDef {
    spinner(name).unwrap_or_else(|| SpinnerDef {
        frames: SPINNER_BRAILLE.to_vec(),
        interval_ms: 1000.0 / LIVE_REFRESH_PER_SECOND,
    })
}

fn draw_line(out: &mut impl Write, frame: &str, message: &str) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    write!(out, "{} {}", frame.cyan(), message.dim())?;
    out.flush()
}

fn clear_line(out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    out.flush()
}
