//! Style tokens such as `"bold bright_blue"` or `"#5e81ac"`.
//!
//! A token is a whitespace-separated list of attribute words and at most one
//! colour. The same token drives the live panel border (ratatui) and printed
//! helpers (crossterm ANSI output).

use std::fmt::Display;
use std::sync::LazyLock;

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};
use ratatui::style::{Color, Modifier, Style};
use regex::Regex;

/// Terminal colour named in a style token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// ANSI black.
    Black,
    /// ANSI red.
    Red,
    /// ANSI green.
    Green,
    /// ANSI yellow.
    Yellow,
    /// ANSI blue.
    Blue,
    /// ANSI magenta.
    Magenta,
    /// ANSI cyan.
    Cyan,
    /// ANSI white.
    White,
    /// Bright variant of an ANSI colour.
    Bright(BaseColor),
    /// 24-bit colour.
    Rgb(u8, u8, u8),
}

/// The eight base ANSI colours, used for bright variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseColor {
    /// Black (renders as dark grey when bright).
    Black,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// White.
    White,
}

impl BaseColor {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "black" => BaseColor::Black,
            "red" => BaseColor::Red,
            "green" => BaseColor::Green,
            "yellow" => BaseColor::Yellow,
            "blue" => BaseColor::Blue,
            "magenta" => BaseColor::Magenta,
            "cyan" => BaseColor::Cyan,
            "white" => BaseColor::White,
            _ => return None,
        })
    }
}

impl Tint {
    /// Parse a colour word: a base name, `bright_<name>`, `grey`, or `#rrggbb`.
    pub fn parse(word: &str) -> Option<Self> {
        let word = word.to_lowercase();
        if let Some(hex) = word.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(rest) = word
            .strip_prefix("bright_")
            .or_else(|| word.strip_prefix("bright-"))
            .or_else(|| word.strip_prefix("bright"))
        {
            return BaseColor::from_name(rest).map(Tint::Bright);
        }
        if word == "grey" || word == "gray" {
            return Some(Tint::Bright(BaseColor::Black));
        }
        BaseColor::from_name(&word).map(|base| match base {
            BaseColor::Black => Tint::Black,
            BaseColor::Red => Tint::Red,
            BaseColor::Green => Tint::Green,
            BaseColor::Yellow => Tint::Yellow,
            BaseColor::Blue => Tint::Blue,
            BaseColor::Magenta => Tint::Magenta,
            BaseColor::Cyan => Tint::Cyan,
            BaseColor::White => Tint::White,
        })
    }

    fn to_ratatui(self) -> Color {
        match self {
            Tint::Black => Color::Black,
            Tint::Red => Color::Red,
            Tint::Green => Color::Green,
            Tint::Yellow => Color::Yellow,
            Tint::Blue => Color::Blue,
            Tint::Magenta => Color::Magenta,
            Tint::Cyan => Color::Cyan,
            Tint::White => Color::Gray,
            Tint::Bright(base) => match base {
                BaseColor::Black => Color::DarkGray,
                BaseColor::Red => Color::LightRed,
                BaseColor::Green => Color::LightGreen,
                BaseColor::Yellow => Color::LightYellow,
                BaseColor::Blue => Color::LightBlue,
                BaseColor::Magenta => Color::LightMagenta,
                BaseColor::Cyan => Color::LightCyan,
                BaseColor::White => Color::White,
            },
            Tint::Rgb(r, g, b) => Color::Rgb(r, g, b),
        }
    }

    fn to_crossterm(self) -> TermColor {
        match self {
            Tint::Black => TermColor::Black,
            Tint::Red => TermColor::DarkRed,
            Tint::Green => TermColor::DarkGreen,
            Tint::Yellow => TermColor::DarkYellow,
            Tint::Blue => TermColor::DarkBlue,
            Tint::Magenta => TermColor::DarkMagenta,
            Tint::Cyan => TermColor::DarkCyan,
            Tint::White => TermColor::Grey,
            Tint::Bright(base) => match base {
                BaseColor::Black => TermColor::DarkGrey,
                BaseColor::Red => TermColor::Red,
                BaseColor::Green => TermColor::Green,
                BaseColor::Yellow => TermColor::Yellow,
                BaseColor::Blue => TermColor::Blue,
                BaseColor::Magenta => TermColor::Magenta,
                BaseColor::Cyan => TermColor::Cyan,
                BaseColor::White => TermColor::White,
            },
            Tint::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        }
    }
}

fn parse_hex(hex: &str) -> Option<Tint> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Tint::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Parsed style token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleSpec {
    /// Foreground colour.
    pub fg: Option<Tint>,
    /// Bold text.
    pub bold: bool,
    /// Dimmed text.
    pub dim: bool,
    /// Italic text.
    pub italic: bool,
    /// Underlined text.
    pub underline: bool,
}

impl StyleSpec {
    /// Parse a style token. Unknown words are ignored; the last colour wins.
    pub fn parse(token: &str) -> Self {
        let mut spec = StyleSpec::default();
        for word in token.split_whitespace() {
            match word.to_lowercase().as_str() {
                "bold" | "b" => spec.bold = true,
                "dim" | "d" => spec.dim = true,
                "italic" | "i" => spec.italic = true,
                "underline" | "u" => spec.underline = true,
                other => match Tint::parse(other) {
                    Some(tint) => spec.fg = Some(tint),
                    None => tracing::debug!(word = other, "ignoring unknown style word"),
                },
            }
        }
        spec
    }

    /// Copy with bold enabled.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Equivalent ratatui style, for widgets.
    pub fn to_ratatui(&self) -> Style {
        let mut style = Style::default();
        if let Some(tint) = self.fg {
            style = style.fg(tint.to_ratatui());
        }
        let mut modifier = Modifier::empty();
        if self.bold {
            modifier |= Modifier::BOLD;
        }
        if self.dim {
            modifier |= Modifier::DIM;
        }
        if self.italic {
            modifier |= Modifier::ITALIC;
        }
        if self.underline {
            modifier |= Modifier::UNDERLINED;
        }
        style.add_modifier(modifier)
    }

    /// Equivalent crossterm style, for printed output.
    pub fn to_content_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg.map(Tint::to_crossterm);
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        if self.dim {
            style.attributes.set(Attribute::Dim);
        }
        if self.italic {
            style.attributes.set(Attribute::Italic);
        }
        if self.underline {
            style.attributes.set(Attribute::Underlined);
        }
        style
    }

    /// Render `text` with this style as ANSI-escaped output.
    pub fn paint<D: Display>(&self, text: D) -> String {
        self.to_content_style().apply(text).to_string()
    }
}

pub(crate) static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;:?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
        .expect("valid ANSI escape pattern")
});

/// Remove ANSI escape sequences (CSI, OSC and two-byte escapes) from `text`.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
