//! Builder configuration.
//!
//! `BuilderSettings` toggles the stricter validation rules that the service
//! documents but the lenient defaults do not enforce. It can be embedded in
//! a larger TOML config file; every field has a default.

use serde::{Deserialize, Serialize};

/// Validation switches shared by the route and event-handler builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Require `intent` or `condition` when creating a transition route.
    #[serde(default)]
    pub require_route_trigger: bool,

    /// Reject an empty `event` name when creating an event handler.
    #[serde(default)]
    pub reject_empty_event: bool,
}

impl BuilderSettings {
    /// Both strictness switches enabled.
    pub fn strict() -> Self {
        Self {
            require_route_trigger: true,
            reject_empty_event: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_settings_default_is_lenient() {
        let settings = BuilderSettings::default();
        assert!(!settings.require_route_trigger);
        assert!(!settings.reject_empty_event);
    }

    #[test]
    fn test_builder_settings_deserialize_with_defaults() {
        let settings: BuilderSettings = toml::from_str("").unwrap();
        assert_eq!(settings, BuilderSettings::default());
    }

    #[test]
    fn test_builder_settings_deserialize_with_values() {
        let toml_str = r#"
require_route_trigger = true
"#;
        let settings: BuilderSettings = toml::from_str(toml_str).unwrap();
        assert!(settings.require_route_trigger);
        assert!(!settings.reject_empty_event);
    }

    #[test]
    fn test_builder_settings_strict() {
        let settings = BuilderSettings::strict();
        assert!(settings.require_route_trigger);
        assert!(settings.reject_empty_event);
    }
}
