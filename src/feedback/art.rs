//! Spinner frame sequences and the process-wide spinner registry.
//!
//! Built-in spinners are available by name. Extra spinners, such as the
//! braille spinner used by status lines, are registered once per process.

use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;

use super::clock::LIVE_REFRESH_PER_SECOND;

/// Braille spinner frames, one per animation tick.
pub const SPINNER_BRAILLE: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Name under which the braille spinner is registered.
pub const BRAILLE_SPINNER_NAME: &str = "braille";

/// A named spinner: its frames and the interval between them.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerDef {
    /// Frames in display order.
    pub frames: Vec<&'static str>,
    /// Milliseconds per frame.
    pub interval_ms: f64,
}

impl SpinnerDef {
    /// Frames per second implied by the interval.
    pub fn rate(&self) -> f64 {
        1000.0 / self.interval_ms
    }

    /// Frame for an index, cycling through the available frames.
    pub fn frame(&self, index: usize) -> &'static str {
        match self.frames.len() {
            0 => SPINNER_BRAILLE[index % SPINNER_BRAILLE.len()],
            n => self.frames[index % n],
        }
    }
}

/// Spinner registry shared by every display in the process.
pub static SPINNERS: LazyLock<RwLock<HashMap<&'static str, SpinnerDef>>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "dots",
        SpinnerDef {
            frames: SPINNER_BRAILLE.to_vec(),
            interval_ms: 80.0,
        },
    );
    m.insert(
        "arrows",
        SpinnerDef {
            frames: vec!["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
            interval_ms: 100.0,
        },
    );
    m.insert(
        "bounce",
        SpinnerDef {
            frames: vec!["⠁", "⠂", "⠄", "⠂"],
            interval_ms: 120.0,
        },
    );
    m.insert(
        "pulse",
        SpinnerDef {
            frames: vec!["◯", "◎", "●", "◎"],
            interval_ms: 120.0,
        },
    );
    RwLock::new(m)
});

/// Look up a spinner by name.
pub fn spinner(name: &str) -> Option<SpinnerDef> {
    SPINNERS.read().get(name).cloned()
}

/// Get a spinner frame by name and index, falling back to the braille frames.
pub fn get_spinner_frame(name: &str, index: usize) -> &'static str {
    match SPINNERS.read().get(name) {
        Some(def) => def.frame(index),
        None => SPINNER_BRAILLE[index % SPINNER_BRAILLE.len()],
    }
}

/// Register the braille spinner so status displays can look it up by name.
///
/// Idempotent; safe to call any number of times from any thread.
pub fn register_braille_spinner() {
    if SPINNERS.read().contains_key(BRAILLE_SPINNER_NAME) {
        return;
    }
    SPINNERS
        .write()
        .entry(BRAILLE_SPINNER_NAME)
        .or_insert_with(|| SpinnerDef {
            frames: SPINNER_BRAILLE.to_vec(),
            interval_ms: 1000.0 / LIVE_REFRESH_PER_SECOND,
        });
}

/// Register the braille spinner if needed and return its name.
///
/// # Example
///
/// ```
/// let name = tpanel::feedback::braille_spinner_for_status();
/// assert_eq!(name, "braille");
/// ```
pub fn braille_spinner_for_status() -> &'static str {
    register_braille_spinner();
    BRAILLE_SPINNER_NAME
}
