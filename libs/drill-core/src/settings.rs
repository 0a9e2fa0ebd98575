//! Session settings: stored defaults, command-line overrides and the
//! merged result.

use crate::error::{DrillError, Result};
use crate::matching::CLOSE_MATCH_RATIO;
use crate::queue::DEFAULT_WINDOW_SIZE;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 500;

/// User defaults, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hard_mode: bool,
    pub double_check: bool,
    pub display_mnemonics: bool,
    pub limit: usize,
    pub window_size: usize,
    pub close_match_ratio: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hard_mode: false,
            double_check: false,
            display_mnemonics: false,
            limit: DEFAULT_LIMIT,
            window_size: DEFAULT_WINDOW_SIZE,
            close_match_ratio: CLOSE_MATCH_RATIO,
        }
    }
}

/// Overrides for a single run (all fields optional).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_mnemonics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_match_ratio: Option<f64>,
}

/// Effective settings (stored defaults merged with overrides).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    pub hard_mode: bool,
    pub double_check: bool,
    pub display_mnemonics: bool,
    pub limit: usize,
    pub window_size: usize,
    pub close_match_ratio: f64,
}

impl EffectiveSettings {
    pub fn merge(settings: &Settings, overrides: &SettingsOverrides) -> Self {
        Self {
            hard_mode: overrides.hard_mode.unwrap_or(settings.hard_mode),
            double_check: overrides.double_check.unwrap_or(settings.double_check),
            display_mnemonics: overrides
                .display_mnemonics
                .unwrap_or(settings.display_mnemonics),
            limit: overrides.limit.unwrap_or(settings.limit),
            window_size: overrides.window_size.unwrap_or(settings.window_size),
            close_match_ratio: overrides
                .close_match_ratio
                .unwrap_or(settings.close_match_ratio),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(DrillError::InvalidSetting {
                name: "limit",
                reason: format!("must be between 1 and {MAX_LIMIT}"),
            });
        }
        if self.window_size == 0 {
            return Err(DrillError::InvalidSetting {
                name: "window_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.close_match_ratio > 0.0 && self.close_match_ratio <= 1.0) {
            return Err(DrillError::InvalidSetting {
                name: "close_match_ratio",
                reason: "must be greater than 0 and at most 1".to_string(),
            });
        }
        Ok(())
    }

    /// The stored form of these settings.
    pub fn to_settings(&self) -> Settings {
        Settings {
            hard_mode: self.hard_mode,
            double_check: self.double_check,
            display_mnemonics: self.display_mnemonics,
            limit: self.limit,
            window_size: self.window_size,
            close_match_ratio: self.close_match_ratio,
        }
    }
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self::merge(&Settings::default(), &SettingsOverrides::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let settings = EffectiveSettings::default();
        assert!(!settings.hard_mode);
        assert_eq!(settings.limit, 50);
        assert_eq!(settings.window_size, 10);
        assert_eq!(settings.close_match_ratio, 0.8);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn overrides_win() {
        let stored = Settings {
            hard_mode: true,
            limit: 20,
            ..Settings::default()
        };
        let overrides = SettingsOverrides {
            hard_mode: Some(false),
            double_check: Some(true),
            ..SettingsOverrides::default()
        };
        let settings = EffectiveSettings::merge(&stored, &overrides);
        assert!(!settings.hard_mode);
        assert!(settings.double_check);
        assert_eq!(settings.limit, 20);
        assert_eq!(settings.to_settings().limit, 20);
    }

    #[test]
    fn rejects_out_of_range_limit() {
        for limit in [0, 501] {
            let settings = EffectiveSettings {
                limit,
                ..EffectiveSettings::default()
            };
            let error = settings.validate().unwrap_err();
            assert_eq!(
                error.to_string(),
                "invalid setting limit: must be between 1 and 500"
            );
        }
        let settings = EffectiveSettings {
            limit: 500,
            ..EffectiveSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_zero_window_and_bad_ratio() {
        let settings = EffectiveSettings {
            window_size: 0,
            ..EffectiveSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(DrillError::InvalidSetting {
                name: "window_size",
                ..
            })
        ));

        for ratio in [0.0, 1.5, f64::NAN] {
            let settings = EffectiveSettings {
                close_match_ratio: ratio,
                ..EffectiveSettings::default()
            };
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"hard_mode": true}"#).unwrap();
        assert!(settings.hard_mode);
        assert_eq!(settings.limit, DEFAULT_LIMIT);
    }
}
