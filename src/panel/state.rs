//! Lock-protected panel state shared between the caller and the render loop.

use parking_lot::Mutex;

use super::buffer::LineBuffer;

#[derive(Debug)]
struct Inner {
    buffer: LineBuffer,
    status: String,
    generation: u64,
}

/// Title, line buffer and status for one panel session.
///
/// `append_line` and `set_status` may be called from any thread. Every
/// mutation bumps a generation counter so the render loop can tell whether
/// anything changed since its last draw.
#[derive(Debug)]
pub struct PanelState {
    title: String,
    inner: Mutex<Inner>,
}

/// Consistent view of the panel taken for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot<'a> {
    /// Panel title.
    pub title: &'a str,
    /// Visible window, oldest first.
    pub lines: Vec<String>,
    /// Status text.
    pub status: String,
    /// Generation at the time of the snapshot.
    pub generation: u64,
}

impl PanelState {
    /// Create state with an empty buffer.
    pub fn new(
        title: impl Into<String>,
        max_lines: usize,
        display_lines: usize,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            inner: Mutex::new(Inner {
                buffer: LineBuffer::new(max_lines, display_lines),
                status: status.into(),
                generation: 0,
            }),
        }
    }

    /// Panel title; fixed for the session.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Append a line to the buffer.
    pub fn append_line(&self, line: impl Into<String>) {
        let line = line.into();
        let mut inner = self.inner.lock();
        inner.buffer.append(line);
        inner.generation += 1;
    }

    /// Replace the status text.
    pub fn set_status(&self, text: impl Into<String>) {
        let text = text.into();
        let mut inner = self.inner.lock();
        inner.status = text;
        inner.generation += 1;
    }

    /// Current status text.
    pub fn status(&self) -> String {
        self.inner.lock().status.clone()
    }

    /// Number of retained lines.
    pub fn line_count(&self) -> usize {
        self.inner.lock().buffer.len()
    }

    /// All retained lines, oldest first.
    pub fn retained_lines(&self) -> Vec<String> {
        self.inner.lock().buffer.iter().map(str::to_string).collect()
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Capture title, visible window and status under one lock acquisition.
    pub fn snapshot(&self) -> PanelSnapshot<'_> {
        let inner = self.inner.lock();
        PanelSnapshot {
            title: &self.title,
            lines: inner.buffer.visible_window(),
            status: inner.status.clone(),
            generation: inner.generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_snapshot_reflects_mutations() {
        let state = PanelState::new("Build", 10, 2, "Running");
        let first = state.snapshot();
        assert_eq!(first.title, "Build");
        assert!(first.lines.is_empty());
        assert_eq!(first.status, "Running");
        assert_eq!(first.generation, 0);

        state.append_line("a");
        state.append_line("b");
        state.append_line("c");
        state.set_status("Linking");

        let snap = state.snapshot();
        assert_eq!(snap.lines, vec!["b", "c"]);
        assert_eq!(snap.status, "Linking");
        assert_eq!(snap.generation, 4);
        assert_eq!(state.line_count(), 3);
    }

    #[test]
    fn test_generation_is_monotonic() {
        let state = PanelState::new("t", 5, 5, "s");
        let mut last = state.generation();
        for i in 0..20 {
            if i % 3 == 0 {
                state.set_status(format!("step {i}"));
            } else {
                state.append_line(format!("line {i}"));
            }
            let now = state.snapshot().generation;
            assert!(now > last);
            last = now;
        }
    }

    #[test]
    fn test_concurrent_appends_keep_bound_and_integrity() {
        const THREADS: usize = 50;
        const PER_THREAD: usize = 1000;
        let state = PanelState::new("stress", 100, 24, "Running");

        std::thread::scope(|s| {
            for t in 0..THREADS {
                let state = &state;
                s.spawn(move || {
                    for i in 0..PER_THREAD {
                        state.append_line(format!("{t}:{i}"));
                    }
                });
            }
            // Concurrent reader while writers run.
            let state = &state;
            s.spawn(move || {
                for _ in 0..200 {
                    assert!(state.snapshot().lines.len() <= 24);
                }
            });
        });

        let lines = state.retained_lines();
        assert_eq!(lines.len(), 100);
        assert_eq!(state.generation(), (THREADS * PER_THREAD) as u64);

        let unique: HashSet<&String> = lines.iter().collect();
        assert_eq!(unique.len(), 100, "no duplicated lines");
        for line in &lines {
            let (t, i) = line.split_once(':').expect("well-formed line");
            assert!(t.parse::<usize>().unwrap() < THREADS);
            assert!(i.parse::<usize>().unwrap() < PER_THREAD);
        }
    }

    #[test]
    fn test_per_thread_order_preserved() {
        let state = PanelState::new("order", 4000, 10, "Running");
        std::thread::scope(|s| {
            for t in 0..4 {
                let state = &state;
                s.spawn(move || {
                    for i in 0..1000 {
                        state.append_line(format!("{t}:{i}"));
                    }
                });
            }
        });
        let lines = state.retained_lines();
        for t in 0..4 {
            let seq: Vec<usize> = lines
                .iter()
                .filter_map(|l| l.split_once(':'))
                .filter(|(owner, _)| owner.parse::<usize>().unwrap() == t)
                .map(|(_, i)| i.parse().unwrap())
                .collect();
            assert_eq!(seq, (0..1000).collect::<Vec<_>>());
        }
    }
}
