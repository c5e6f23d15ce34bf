//! Captured output to styled ratatui lines.
//!
//! Select Graphic Rendition (SGR) sequences become span styles. Every other
//! escape sequence and control character is dropped, and tabs are expanded.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::spec::{strip_ansi, ANSI_ESCAPE};

const TAB: &str = "    ";

const BASE: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
];

const BRIGHT: [Color; 8] = [
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

/// Make a captured line safe to draw as plain text: escapes removed, tabs
/// expanded, control characters dropped.
pub fn sanitize_line(line: &str) -> String {
    plain(&strip_ansi(line))
}

/// Convert a line of captured output into a styled ratatui line.
///
/// Falls back to the unstyled [`sanitize_line`] text when an SGR sequence
/// cannot be parsed.
pub fn ansi_line(text: &str) -> Line<'static> {
    match styled_spans(text) {
        Some(spans) => Line::from(spans),
        None => Line::raw(sanitize_line(text)),
    }
}

fn styled_spans(text: &str) -> Option<Vec<Span<'static>>> {
    let mut spans = Vec::new();
    let mut style = Style::default();
    let mut last = 0;
    for m in ANSI_ESCAPE.find_iter(text) {
        push_text(&mut spans, &text[last..m.start()], style);
        last = m.end();
        if let Some(params) = sgr_params(m.as_str()) {
            style = apply_sgr(style, params)?;
        }
    }
    push_text(&mut spans, &text[last..], style);
    Some(spans)
}

fn push_text(spans: &mut Vec<Span<'static>>, raw: &str, style: Style) {
    let text = plain(raw);
    if !text.is_empty() {
        spans.push(Span::styled(text, style));
    }
}

fn plain(text: &str) -> String {
    text.replace('\t', TAB)
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

fn sgr_params(sequence: &str) -> Option<&str> {
    sequence.strip_prefix("\x1b[")?.strip_suffix('m')
}

fn apply_sgr(mut style: Style, params: &str) -> Option<Style> {
    let codes: Vec<u16> = params
        .split(';')
        .map(|p| if p.is_empty() { Some(0) } else { p.parse().ok() })
        .collect::<Option<_>>()?;

    let mut codes = codes.into_iter();
    while let Some(code) = codes.next() {
        style = match code {
            0 => Style::default(),
            1 => style.add_modifier(Modifier::BOLD),
            2 => style.add_modifier(Modifier::DIM),
            3 => style.add_modifier(Modifier::ITALIC),
            4 => style.add_modifier(Modifier::UNDERLINED),
            5 => style.add_modifier(Modifier::SLOW_BLINK),
            6 => style.add_modifier(Modifier::RAPID_BLINK),
            7 => style.add_modifier(Modifier::REVERSED),
            8 => style.add_modifier(Modifier::HIDDEN),
            9 => style.add_modifier(Modifier::CROSSED_OUT),
            21 | 22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style.remove_modifier(Modifier::ITALIC),
            24 => style.remove_modifier(Modifier::UNDERLINED),
            25 => style.remove_modifier(Modifier::SLOW_BLINK | Modifier::RAPID_BLINK),
            27 => style.remove_modifier(Modifier::REVERSED),
            28 => style.remove_modifier(Modifier::HIDDEN),
            29 => style.remove_modifier(Modifier::CROSSED_OUT),
            30..=37 => style.fg(BASE[usize::from(code - 30)]),
            38 => style.fg(extended_colour(&mut codes)?),
            39 => style.fg(Color::Reset),
            40..=47 => style.bg(BASE[usize::from(code - 40)]),
            48 => style.bg(extended_colour(&mut codes)?),
            49 => style.bg(Color::Reset),
            90..=97 => style.fg(BRIGHT[usize::from(code - 90)]),
            100..=107 => style.bg(BRIGHT[usize::from(code - 100)]),
            _ => style,
        };
    }
    Some(style)
}

/// `5;n` (256-colour index) or `2;r;g;b` (truecolor) after a 38/48 code.
fn extended_colour(codes: &mut impl Iterator<Item = u16>) -> Option<Color> {
    let mut component = || codes.next().and_then(|c| u8::try_from(c).ok());
    match component()? {
        5 => Some(Color::Indexed(component()?)),
        2 => Some(Color::Rgb(component()?, component()?, component()?)),
        _ => None,
    }
}
