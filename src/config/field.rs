//! ConfigField trait for dynamic get/set access to panel settings.
//!
//! This powers `--set key=value` overrides on the command line.

use super::TransientPanelConfig;

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The assignment is not in `key=value` form.
    #[error("Invalid assignment: {0} (expected key=value)")]
    InvalidAssignment(String),
}

/// Trait for configs that support field access by name.
pub trait ConfigField {
    /// Get a field value by name, returning its string form.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;
}

/// Split a `key=value` assignment.
///
/// # Examples
///
/// ```ignore
/// split_assignment("display_lines=30") // Ok(("display_lines", "30"))
/// split_assignment("display_lines")    // Err(InvalidAssignment)
/// ```
pub fn split_assignment(assignment: &str) -> Result<(&str, &str), FieldError> {
    assignment
        .split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| FieldError::InvalidAssignment(assignment.to_string()))
}

fn invalid(key: &str, expected: &str) -> FieldError {
    FieldError::InvalidValue {
        key: key.into(),
        expected: expected.into(),
    }
}

fn parse_padding(value: &str) -> Option<(u16, u16)> {
    let (v, h) = value.split_once(',')?;
    Some((v.trim().parse().ok()?, h.trim().parse().ok()?))
}

impl ConfigField for TransientPanelConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "max_lines" => Some(self.max_lines.to_string()),
            "display_lines" => Some(self.display_lines.to_string()),
            "refresh_per_second" => Some(self.refresh_per_second.to_string()),
            "animation_rate" => Some(self.animation_rate.to_string()),
            "default_status" => Some(self.default_status.clone()),
            "reserve_lines" => Some(self.reserve_lines.to_string()),
            "border_style" => Some(self.border_style.clone()),
            "padding" => Some(format!("{},{}", self.padding.0, self.padding.1)),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "max_lines" => {
                self.max_lines = value
                    .parse()
                    .map_err(|_| invalid(key, "positive integer"))?;
            }
            "display_lines" => {
                self.display_lines = value
                    .parse()
                    .map_err(|_| invalid(key, "positive integer"))?;
            }
            "refresh_per_second" => {
                self.refresh_per_second =
                    value.parse().map_err(|_| invalid(key, "positive number"))?;
            }
            "animation_rate" => {
                self.animation_rate = value.parse().map_err(|_| invalid(key, "positive number"))?;
            }
            "default_status" => self.default_status = value.to_string(),
            "reserve_lines" => {
                self.reserve_lines = value
                    .parse()
                    .map_err(|_| invalid(key, "non-negative integer"))?;
            }
            "border_style" => self.border_style = value.to_string(),
            "padding" => {
                self.padding = parse_padding(value).ok_or_else(|| invalid(key, "vertical,horizontal"))?;
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "max_lines",
            "display_lines",
            "refresh_per_second",
            "animation_rate",
            "default_status",
            "reserve_lines",
            "border_style",
            "padding",
        ]
    }
}
