//! Spinner animation shared by every live display.
//!
//! This module provides the spinner frame sets, the wall-clock frame clock
//! that keeps independent displays in sync, and an inline status spinner.

mod art;
mod clock;
mod spinner;

pub use art::{
    braille_spinner_for_status, get_spinner_frame, register_braille_spinner, spinner,
    SpinnerDef, BRAILLE_SPINNER_NAME, SPINNERS, SPINNER_BRAILLE,
};
pub use clock::{
    braille_frame, current_frame, frame_now, monotonic_secs, tick_duration,
    LIVE_REFRESH_PER_SECOND,
};
pub use spinner::StatusSpinner;
