//! Rendering collaborators for the live panel.
//!
//! The runner decides what to show each tick and hands it to a
//! [`PanelRenderer`]. [`TerminalRenderer`] draws into a ratatui inline
//! viewport below the cursor and erases it on `clear`. [`StdoutRenderer`]
//! picks between that and [`NullRenderer`] depending on whether stdout is a
//! terminal.

use std::io::{self, IsTerminal, Stdout};

use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};

use super::error::RenderError;
use crate::config::TransientPanelConfig;
use crate::style::{ansi_line, StyleSpec};

/// Everything a renderer needs to draw one tick.
#[derive(Debug, Clone, Copy)]
pub struct PanelFrame<'a> {
    /// Panel title.
    pub title: &'a str,
    /// Visible lines, oldest first. May carry SGR colour sequences.
    pub lines: &'a [String],
    /// Status text.
    pub status: &'a str,
    /// Current spinner frame.
    pub spinner: &'a str,
    /// Border style token.
    pub border_style: &'a str,
    /// Padding as (vertical, horizontal).
    pub padding: (u16, u16),
}

/// Draws panel frames and removes them when the session ends.
pub trait PanelRenderer: Send {
    /// Draw one frame, replacing whatever was drawn before.
    fn render(&mut self, frame: &PanelFrame<'_>) -> Result<(), RenderError>;

    /// Remove everything drawn so far. Called once at teardown.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Maximum number of body lines this renderer can show, if limited.
    fn visible_rows(&self) -> Option<usize> {
        None
    }
}

/// Renderer that draws nothing, for non-interactive output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl PanelRenderer for NullRenderer {
    fn render(&mut self, _frame: &PanelFrame<'_>) -> Result<(), RenderError> {
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

type StdoutTerminal = Terminal<CrosstermBackend<Stdout>>;

enum InlineViewport {
    /// Not opened yet; the next draw opens it.
    Pending,
    Open(StdoutTerminal),
    /// Opening failed once; never retried, so a terminal that does not answer
    /// the cursor query costs at most one timeout.
    Unavailable,
}

/// Renderer drawing a bordered panel into an inline viewport on stdout.
///
/// The viewport is created on the first draw, so constructing the renderer
/// has no effect on the terminal.
pub struct TerminalRenderer {
    viewport: InlineViewport,
    rows: usize,
    padding: (u16, u16),
}

impl TerminalRenderer {
    /// Create a renderer sized for `config` and the current terminal height.
    pub fn new(config: &TransientPanelConfig) -> Self {
        let terminal_rows = crossterm::terminal::size().map(|(_, h)| h).unwrap_or(30);
        Self {
            viewport: InlineViewport::Pending,
            rows: config.effective_display_lines(terminal_rows),
            padding: config.padding,
        }
    }

    fn viewport_height(&self) -> u16 {
        let rows = u16::try_from(self.rows).unwrap_or(u16::MAX);
        rows.saturating_add(2)
            .saturating_add(self.padding.0.saturating_mul(2))
    }

    fn open(&self) -> Result<StdoutTerminal, RenderError> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(self.viewport_height()),
            },
        )?;
        terminal.hide_cursor()?;
        Ok(terminal)
    }

    fn terminal(&mut self) -> Result<&mut StdoutTerminal, RenderError> {
        if let InlineViewport::Pending = self.viewport {
            match self.open() {
                Ok(terminal) => self.viewport = InlineViewport::Open(terminal),
                Err(err) => {
                    self.viewport = InlineViewport::Unavailable;
                    return Err(err);
                }
            }
        }
        match &mut self.viewport {
            InlineViewport::Open(terminal) => Ok(terminal),
            _ => Err(RenderError::Unavailable),
        }
    }
}

impl PanelRenderer for TerminalRenderer {
    fn render(&mut self, frame: &PanelFrame<'_>) -> Result<(), RenderError> {
        let terminal = self.terminal()?;
        terminal.draw(|f| draw_panel(f, frame))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        match std::mem::replace(&mut self.viewport, InlineViewport::Pending) {
            InlineViewport::Open(mut terminal) => {
                // Inline clear parks the cursor on the viewport's first row, so
                // whatever the caller prints next replaces the panel.
                terminal.clear()?;
                terminal.show_cursor()?;
                Backend::flush(terminal.backend_mut())?;
            }
            other => self.viewport = other,
        }
        Ok(())
    }

    fn visible_rows(&self) -> Option<usize> {
        Some(self.rows)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.clear();
    }
}

/// Renderer for stdout: draws the panel when stdout is a terminal and
/// nothing when it is redirected.
pub enum StdoutRenderer {
    /// Stdout is a terminal.
    Terminal(TerminalRenderer),
    /// Stdout is a pipe or file.
    Null(NullRenderer),
}

impl StdoutRenderer {
    /// Choose a renderer based on whether stdout is a terminal.
    pub fn detect(config: &TransientPanelConfig) -> Self {
        Self::new(config, io::stdout().is_terminal())
    }

    /// Build the terminal renderer when `interactive`, the null one otherwise.
    pub fn new(config: &TransientPanelConfig, interactive: bool) -> Self {
        if interactive {
            StdoutRenderer::Terminal(TerminalRenderer::new(config))
        } else {
            StdoutRenderer::Null(NullRenderer)
        }
    }

    /// Whether the panel is actually drawn.
    pub fn is_interactive(&self) -> bool {
        matches!(self, StdoutRenderer::Terminal(_))
    }
}

impl PanelRenderer for StdoutRenderer {
    fn render(&mut self, frame: &PanelFrame<'_>) -> Result<(), RenderError> {
        match self {
            StdoutRenderer::Terminal(r) => r.render(frame),
            StdoutRenderer::Null(r) => r.render(frame),
        }
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        match self {
            StdoutRenderer::Terminal(r) => r.clear(),
            StdoutRenderer::Null(r) => r.clear(),
        }
    }

    fn visible_rows(&self) -> Option<usize> {
        match self {
            StdoutRenderer::Terminal(r) => r.visible_rows(),
            StdoutRenderer::Null(r) => r.visible_rows(),
        }
    }
}

fn draw_panel(f: &mut Frame, panel: &PanelFrame<'_>) {
    let (pad_v, pad_h) = panel.padding;
    let status = Line::from(vec![
        Span::raw(" "),
        Span::raw(panel.spinner),
        Span::raw(" "),
        Span::raw(panel.status),
        Span::raw(" "),
    ])
    .style(Style::default().add_modifier(Modifier::DIM));

    let block = Block::bordered()
        .title(format!(" {} ", panel.title))
        .title_bottom(status)
        .border_style(StyleSpec::parse(panel.border_style).to_ratatui())
        .padding(Padding::new(pad_h, pad_h, pad_v, pad_v));

    let body: Vec<Line> = panel.lines.iter().map(|line| ansi_line(line)).collect();

    f.render_widget(Paragraph::new(body).block(block), f.area());
}
