//! Stateless formatting helpers: section rules and key-value panels.
//!
//! These produce ANSI-styled strings meant to be printed after a live panel
//! has closed, so only the high-level summary stays in scrollback.

use super::spec::{strip_ansi, StyleSpec};
use super::theme::STYLE_SECTION;

/// Default width for rules when the terminal size is unknown.
pub const DEFAULT_RULE_WIDTH: usize = 80;

const RULE_CHAR: char = '─';

/// Display width in columns, ignoring ANSI escape sequences.
fn width_of(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// A horizontal rule with a bold, centred title.
///
/// # Example
///
/// ```ignore
/// println!("{}", section_rule("FETCH", &StyleSpec::parse(STYLE_SECTION), 60));
/// ```
pub fn section_rule(title: &str, style: &StyleSpec, width: usize) -> String {
    let label = format!(" {title} ");
    let label_width = width_of(&label);
    if label_width + 2 > width {
        return style.bold().paint(title);
    }
    let left = (width - label_width) / 2;
    let right = width - label_width - left;
    format!(
        "{}{}{}",
        style.paint(RULE_CHAR.to_string().repeat(left)),
        style.bold().paint(label),
        style.paint(RULE_CHAR.to_string().repeat(right)),
    )
}

/// A dim rule, for a subtle separator between sections.
pub fn dim_rule(width: usize) -> String {
    StyleSpec::parse("dim").paint(RULE_CHAR.to_string().repeat(width))
}

/// A line in a key-value panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelLine {
    /// A labelled value; `None` values are omitted when `skip_none` is set.
    Pair(String, Option<String>),
    /// A preformatted line, shown as-is.
    Text(String),
}

impl PanelLine {
    /// Labelled value.
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        PanelLine::Pair(label.into(), Some(value.into()))
    }

    /// Labelled optional value.
    pub fn maybe(label: impl Into<String>, value: Option<String>) -> Self {
        PanelLine::Pair(label.into(), value)
    }
}

/// Options for [`key_value_panel`].
#[derive(Debug, Clone)]
pub struct KeyValuePanelOptions {
    /// Optional title shown in the top border.
    pub title: Option<String>,
    /// Border style.
    pub border_style: StyleSpec,
    /// Padding as (vertical, horizontal).
    pub padding: (u16, u16),
    /// Style applied to labels.
    pub label_style: StyleSpec,
    /// Omit pairs whose value is `None`.
    pub skip_none: bool,
}

impl Default for KeyValuePanelOptions {
    fn default() -> Self {
        Self {
            title: None,
            border_style: StyleSpec::parse(STYLE_SECTION),
            padding: (0, 1),
            label_style: StyleSpec::parse("bold"),
            skip_none: true,
        }
    }
}

/// Build a bordered panel from key-value pairs or preformatted lines.
///
/// Pairs render as `  label: value`. The panel is sized to its content.
pub fn key_value_panel(lines: &[PanelLine], options: &KeyValuePanelOptions) -> String {
    // (plain text for measuring, styled text for output)
    let mut body: Vec<(String, String)> = Vec::new();
    for line in lines {
        match line {
            PanelLine::Pair(_, None) if options.skip_none => {}
            PanelLine::Pair(label, value) => {
                let value = value.as_deref().unwrap_or("");
                let plain = format!("  {label}: {value}");
                let styled = format!(
                    "  {} {value}",
                    options.label_style.paint(format!("{label}:"))
                );
                body.push((plain, styled));
            }
            PanelLine::Text(text) => body.push((text.clone(), text.clone())),
        }
    }

    let (pad_v, pad_h) = (
        usize::from(options.padding.0),
        usize::from(options.padding.1),
    );
    let title_width = options
        .title
        .as_deref()
        .map(|t| width_of(t) + 2)
        .unwrap_or(0);
    let content_width = body
        .iter()
        .map(|(plain, _)| width_of(plain))
        .max()
        .unwrap_or(0);
    let inner = (content_width + pad_h * 2).max(title_width + 2);
    let border = &options.border_style;

    let mut out = Vec::with_capacity(body.len() + pad_v * 2 + 2);
    out.push(match options.title.as_deref() {
        Some(title) => {
            let rest = inner - (width_of(title) + 2) - 1;
            format!(
                "{}{}{}",
                border.paint("╭─"),
                format!(" {title} "),
                border.paint(format!("{}╮", "─".repeat(rest)))
            )
        }
        None => border.paint(format!("╭{}╮", "─".repeat(inner))),
    });
    let blank = format!("{}{}{}", border.paint("│"), " ".repeat(inner), border.paint("│"));
    for _ in 0..pad_v {
        out.push(blank.clone());
    }
    for (plain, styled) in &body {
        let fill = inner - pad_h - width_of(plain);
        out.push(format!(
            "{}{}{}{}{}",
            border.paint("│"),
            " ".repeat(pad_h),
            styled,
            " ".repeat(fill),
            border.paint("│")
        ));
    }
    for _ in 0..pad_v {
        out.push(blank.clone());
    }
    out.push(border.paint(format!("╰{}╯", "─".repeat(inner))));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_rule_centres_title() {
        let rule = strip_ansi(&section_rule("FETCH", &StyleSpec::parse("blue"), 21));
        assert_eq!(width_of(&rule), 21);
        assert_eq!(rule, "─────── FETCH ───────");
    }

    #[test]
    fn test_section_rule_narrow_width() {
        let rule = strip_ansi(&section_rule("A very long title", &StyleSpec::default(), 5));
        assert_eq!(rule, "A very long title");
    }

    #[test]
    fn test_dim_rule() {
        assert_eq!(strip_ansi(&dim_rule(4)), "────");
    }

    #[test]
    fn test_key_value_panel_pairs() {
        let panel = key_value_panel(
            &[
                PanelLine::pair("Backend", "sumologic"),
                PanelLine::maybe("Skipped", None),
                PanelLine::pair("Limit", "10000"),
            ],
            &KeyValuePanelOptions::default(),
        );
        let plain = strip_ansi(&panel);
        let rows: Vec<&str> = plain.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains("Backend: sumologic"));
        assert!(rows[2].contains("Limit: 10000"));
        assert!(!plain.contains("Skipped"));
        let widths: Vec<usize> = rows.iter().map(|r| width_of(r)).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
    }

    #[test]
    fn test_key_value_panel_keeps_none_when_asked() {
        let options = KeyValuePanelOptions {
            skip_none: false,
            ..Default::default()
        };
        let plain = strip_ansi(&key_value_panel(&[PanelLine::maybe("Empty", None)], &options));
        assert!(plain.contains("Empty:"));
    }

    #[test]
    fn test_key_value_panel_title_and_text() {
        let options = KeyValuePanelOptions {
            title: Some("Run settings".into()),
            padding: (1, 1),
            ..Default::default()
        };
        let plain = strip_ansi(&key_value_panel(
            &[PanelLine::Text("  Size  1,234".into())],
            &options,
        ));
        let rows: Vec<&str> = plain.lines().collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].starts_with("╭─ Run settings "));
        assert!(rows[2].contains("Size  1,234"));
        let widths: Vec<usize> = rows.iter().map(|r| width_of(r)).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
    }

    #[test]
    fn test_key_value_panel_aligns_styled_content() {
        let options = KeyValuePanelOptions {
            title: Some("sample".into()),
            ..Default::default()
        };
        let panel = key_value_panel(
            &[
                PanelLine::pair("success", StyleSpec::parse("green").paint("✓ done")),
                PanelLine::pair("warning", StyleSpec::parse("bold #ebcb8b").paint("! retrying")),
                PanelLine::Text(StyleSpec::parse("dim").paint("  12 lines captured")),
            ],
            &options,
        );
        assert!(panel.contains('\x1b'), "content should stay styled");
        let plain = strip_ansi(&panel);
        let widths: Vec<usize> = plain.lines().map(|r| r.chars().count()).collect();
        assert_eq!(widths.len(), 5);
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}");
        assert!(plain.contains("success: ✓ done"));
    }

    #[test]
    fn test_width_of_ignores_escapes() {
        assert_eq!(width_of("\x1b[1;32mok\x1b[0m"), 2);
        assert_eq!(width_of("│ ✓ │"), 5);
    }

    #[test]
    fn test_key_value_panel_empty() {
        let plain = strip_ansi(&key_value_panel(&[], &KeyValuePanelOptions::default()));
        assert_eq!(plain.lines().count(), 2);
    }
}
