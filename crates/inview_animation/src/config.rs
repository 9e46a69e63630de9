//! Engine configuration
//!
//! Global defaults for the attribute parser plus the names of the markers the
//! engine writes. Every field is optional in TOML:
//!
//! ```toml
//! animating_class = "is-animating"
//! ready_attribute = "data-animate-ready"
//!
//! [defaults]
//! duration = 500
//! easing = "spring"
//! intensity = "subtle"
//!
//! [stagger]
//! default_duration = 80
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::AnimateDefaults;

/// Stagger group settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerDefaults {
    /// Per-child increment (ms) when the stagger attribute has no usable value
    pub default_duration: u32,
    /// Visible fraction of the group parent that triggers the group
    pub threshold: f64,
}

impl Default for StaggerDefaults {
    fn default() -> Self {
        Self {
            default_duration: 100,
            threshold: 0.1,
        }
    }
}

/// Configuration for an [`AnimationController`](crate::AnimationController)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub defaults: AnimateDefaults,
    pub stagger: StaggerDefaults,
    /// Class toggled on elements while they are animated in
    pub animating_class: String,
    /// Root attribute marking a completed initialization
    pub ready_attribute: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defaults: AnimateDefaults::default(),
            stagger: StaggerDefaults::default(),
            animating_class: "is-animating".to_string(),
            ready_attribute: "data-animate-ready".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the watcher pool and the host depend on
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold("defaults.threshold", self.defaults.threshold)?;
        validate_threshold("stagger.threshold", self.stagger.threshold)?;

        if self.defaults.duration == 0 {
            return Err(ConfigError::Invalid(
                "defaults.duration must be positive".to_string(),
            ));
        }
        if self.stagger.default_duration == 0 {
            return Err(ConfigError::Invalid(
                "stagger.default_duration must be positive".to_string(),
            ));
        }
        if self.animating_class.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "animating_class must not be empty".to_string(),
            ));
        }
        if self.ready_attribute.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "ready_attribute must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_threshold(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be in (0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::model::{Direction, Intensity, IntensityPreset};

    #[test]
    fn test_empty_document_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.defaults.duration, 700);
        assert_eq!(config.defaults.threshold, 0.2);
        assert_eq!(config.stagger.default_duration, 100);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            animating_class = "in-view"

            [defaults]
            direction = "left"
            easing = "spring"
            intensity = "strong"

            [stagger]
            threshold = 0.25
            "#,
        )
        .unwrap();

        assert_eq!(config.animating_class, "in-view");
        assert_eq!(config.defaults.direction, Direction::Left);
        assert_eq!(config.defaults.easing, Easing::Spring);
        assert_eq!(
            config.defaults.intensity,
            Intensity::Preset(IntensityPreset::Strong)
        );
        assert_eq!(config.defaults.duration, 700);
        assert_eq!(config.stagger.threshold, 0.25);
        assert_eq!(config.stagger.default_duration, 100);
    }

    #[test]
    fn test_numeric_intensity() {
        let config = EngineConfig::from_toml_str("[defaults]\nintensity = 0.4\n").unwrap();
        assert_eq!(config.defaults.intensity, Intensity::Fraction(0.4));
    }

    #[test]
    fn test_unknown_easing_is_rejected() {
        let err = EngineConfig::from_toml_str("[defaults]\neasing = \"wobble\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = EngineConfig::default();
        config.stagger.threshold = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.defaults.threshold = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.animating_class = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        assert!(EngineConfig::default().validate().is_ok());
    }
}
