//! Bounded line buffer with FIFO eviction.

use std::collections::VecDeque;

/// Ordered, bounded buffer of output lines.
///
/// Holds at most `max_lines` entries; appending past capacity evicts the
/// oldest. The visible window is the newest `display_lines` entries.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
    display_lines: usize,
}

impl LineBuffer {
    /// Create an empty buffer.
    ///
    /// `display_lines` is clamped to `max_lines`, and both to at least one.
    pub fn new(max_lines: usize, display_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        Self {
            lines: VecDeque::with_capacity(max_lines),
            max_lines,
            display_lines: display_lines.clamp(1, max_lines),
        }
    }

    /// Append a line as the newest entry, evicting from the oldest end if full.
    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    /// Copy of the newest `display_lines` entries, oldest first.
    pub fn visible_window(&self) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(self.display_lines);
        self.lines.iter().skip(skip).cloned().collect()
    }

    /// Number of retained lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Retention capacity.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Size of the visible window.
    pub fn display_lines(&self) -> usize {
        self.display_lines
    }

    /// All retained lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
