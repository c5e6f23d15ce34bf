//! Built-in colour themes.
//!
//! Every theme maps the same four semantic keys to a style token, so helpers
//! can be written against `section`/`success`/`warning`/`dim` and recoloured
//! by switching theme.

use super::spec::StyleSpec;

/// Raw section colour, for use without a theme.
pub const STYLE_SECTION: &str = "blue";
/// Raw success colour.
pub const STYLE_SUCCESS: &str = "green";
/// Raw warning colour.
pub const STYLE_WARNING: &str = "yellow";
/// Raw dim style.
pub const STYLE_DIM: &str = "dim";

/// Theme key for section headers.
pub const THEME_STYLE_SECTION: &str = "section";
/// Theme key for success output.
pub const THEME_STYLE_SUCCESS: &str = "success";
/// Theme key for warnings.
pub const THEME_STYLE_WARNING: &str = "warning";
/// Theme key for de-emphasised output.
pub const THEME_STYLE_DIM: &str = "dim";

/// A palette for the four semantic style keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Theme name.
    pub name: &'static str,
    /// Style token for `section`.
    pub section: &'static str,
    /// Style token for `success`.
    pub success: &'static str,
    /// Style token for `warning`.
    pub warning: &'static str,
    /// Style token for `dim`.
    pub dim: &'static str,
}

const fn theme(
    name: &'static str,
    section: &'static str,
    success: &'static str,
    warning: &'static str,
) -> Theme {
    Theme {
        name,
        section,
        success,
        warning,
        dim: STYLE_DIM,
    }
}

/// Built-in themes, `default` first.
pub const THEMES: [Theme; 7] = [
    theme("default", "blue", "green", "yellow"),
    theme("ngate", "blue", "green", "yellow"),
    theme("muted", "dim blue", "dim green", "dim yellow"),
    theme(
        "high_contrast",
        "bold bright_blue",
        "bold bright_green",
        "bold bright_yellow",
    ),
    theme("mono", "bold", "bold", "italic"),
    theme("nord", "#5e81ac", "#a3be8c", "#ebcb8b"),
    theme("dracula", "#bd93f9", "#50fa7b", "#f1fa8c"),
];

/// Return a built-in theme by name, falling back to `default` if unknown.
pub fn get_theme(name: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.name == name)
        .unwrap_or(&THEMES[0])
}

/// Names of all built-in themes.
pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|t| t.name)
}

impl Theme {
    /// Resolve a token: theme keys map to this theme's palette, anything else
    /// is parsed as a literal style.
    pub fn resolve(&self, token: &str) -> StyleSpec {
        let raw = match token {
            THEME_STYLE_SECTION => self.section,
            THEME_STYLE_SUCCESS => self.success,
            THEME_STYLE_WARNING => self.warning,
            THEME_STYLE_DIM => self.dim,
            other => other,
        };
        StyleSpec::parse(raw)
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}
