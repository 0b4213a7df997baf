use serde::Deserialize;
use std::time::Duration;

/// Construction-time options for the coordinator.
///
/// Unrecognized keys are rejected, missing keys fall back to the defaults
/// below. The record is deserializable so a host application can keep it in
/// its own TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerConfig {
    /// Selector naming the container element views are rendered under.
    pub container_selector: String,
    /// Delay between marking the previous view inactive and finalizing the
    /// swap, in milliseconds. Matches the CSS transition length.
    pub transition_delay_ms: u64,
    /// Marker applied to a view to transition it in.
    pub active_marker: String,
    /// Marker applied to a view to transition it out.
    pub inactive_marker: String,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            container_selector: "body".to_string(),
            transition_delay_ms: 500,
            active_marker: "active".to_string(),
            inactive_marker: "inactive".to_string(),
        }
    }
}

impl PagerConfig {
    /// Parse a config from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// The transition delay as a [`Duration`].
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PagerConfig::default();
        assert_eq!(config.container_selector, "body");
        assert_eq!(config.transition_delay_ms, 500);
        assert_eq!(config.active_marker, "active");
        assert_eq!(config.inactive_marker, "inactive");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config = PagerConfig::from_toml_str(
            r##"
            container_selector = "#app"
            transition_delay_ms = 250
            "##,
        )
        .unwrap();
        assert_eq!(config.container_selector, "#app");
        assert_eq!(config.transition_delay(), Duration::from_millis(250));
        assert_eq!(config.active_marker, "active");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PagerConfig::from_toml_str("timeout = 500").is_err());
    }
}
