//! Validation rules for panel configuration.

use super::{ConfigError, TransientPanelConfig};

impl TransientPanelConfig {
    /// Check the config is usable for a panel session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroCount("max_lines"));
        }
        if self.display_lines == 0 {
            return Err(ConfigError::ZeroCount("display_lines"));
        }
        if self.display_lines > self.max_lines {
            return Err(ConfigError::DisplayExceedsMax {
                display_lines: self.display_lines,
                max_lines: self.max_lines,
            });
        }
        check_rate("refresh_per_second", self.refresh_per_second)?;
        check_rate("animation_rate", self.animation_rate)?;
        Ok(())
    }
}

fn check_rate(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TransientPanelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_display_over_max_rejected() {
        let cfg = TransientPanelConfig {
            display_lines: 30,
            max_lines: 20,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "display_lines (30) must not exceed max_lines (20)"
        );
    }

    #[test]
    fn test_display_equal_to_max_allowed() {
        let cfg = TransientPanelConfig {
            display_lines: 20,
            max_lines: 20,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_counts_rejected() {
        let cfg = TransientPanelConfig {
            max_lines: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroCount("max_lines"))));

        let cfg = TransientPanelConfig {
            display_lines: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroCount("display_lines"))
        ));
    }

    #[test]
    fn test_bad_rates_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = TransientPanelConfig {
                refresh_per_second: bad,
                ..Default::default()
            };
            assert!(
                matches!(
                    cfg.validate(),
                    Err(ConfigError::InvalidRate {
                        field: "refresh_per_second",
                        ..
                    })
                ),
                "refresh {bad}"
            );

            let cfg = TransientPanelConfig {
                animation_rate: bad,
                ..Default::default()
            };
            assert!(matches!(
                cfg.validate(),
                Err(ConfigError::InvalidRate {
                    field: "animation_rate",
                    ..
                })
            ));
        }
    }
}
