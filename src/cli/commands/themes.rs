//! Themes command implementation.
//!
//! Prints a section rule and a sample summary panel for each built-in theme.

use crate::style::{
    dim_rule, key_value_panel, section_rule, Theme, KeyValuePanelOptions, PanelLine, THEMES,
    THEME_STYLE_DIM, THEME_STYLE_SECTION, THEME_STYLE_SUCCESS, THEME_STYLE_WARNING,
};

const PREVIEW_WIDTH: usize = 60;

/// Error type for themes command operations.
#[derive(Debug, thiserror::Error)]
pub enum ThemesCommandError {
    /// No built-in theme has this name.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Render the preview block for one theme.
pub fn preview(theme: &Theme) -> String {
    let lines = [
        PanelLine::pair("success", theme.resolve(THEME_STYLE_SUCCESS).paint("✓ done")),
        PanelLine::pair("warning", theme.resolve(THEME_STYLE_WARNING).paint("! retrying")),
        PanelLine::pair("dim", theme.resolve(THEME_STYLE_DIM).paint("12 lines captured")),
    ];
    let options = KeyValuePanelOptions {
        title: Some("sample".to_string()),
        border_style: theme.resolve(THEME_STYLE_SECTION),
        ..Default::default()
    };
    format!(
        "{}\n{}",
        section_rule(theme.name, &theme.resolve(THEME_STYLE_SECTION), PREVIEW_WIDTH),
        key_value_panel(&lines, &options)
    )
}

/// Execute the themes command.
pub fn themes(name: Option<&str>) -> Result<(), ThemesCommandError> {
    let selected: Vec<&Theme> = match name {
        Some(name) => {
            let theme = THEMES
                .iter()
                .find(|t| t.name == name)
                .ok_or_else(|| ThemesCommandError::UnknownTheme(name.to_string()))?;
            vec![theme]
        }
        None => THEMES.iter().collect(),
    };

    for (i, theme) in selected.iter().enumerate() {
        if i > 0 {
            println!("{}", dim_rule(PREVIEW_WIDTH));
        }
        println!("{}", preview(theme));
    }
    Ok(())
}
