//! CLI styling: style tokens, themes, section rules and key-value panels.
//!
//! These are stateless presentation helpers. The live panel uses style tokens
//! for its border and [`ansi_line`] for coloured output lines; everything else
//! is printed after the panel closes.

mod ansi;
mod format;
mod spec;
mod theme;

pub use ansi::{ansi_line, sanitize_line};
pub use format::{
    dim_rule, key_value_panel, section_rule, KeyValuePanelOptions, PanelLine, DEFAULT_RULE_WIDTH,
};
pub use spec::{strip_ansi, BaseColor, StyleSpec, Tint};
pub use theme::{
    get_theme, theme_names, Theme, STYLE_DIM, STYLE_SECTION, STYLE_SUCCESS, STYLE_WARNING,
    THEMES, THEME_STYLE_DIM, THEME_STYLE_SECTION, THEME_STYLE_SUCCESS, THEME_STYLE_WARNING,
};
