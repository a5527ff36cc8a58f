//! Router settings for Nivoxar core
//!
//! Core only accepts fully resolved, validated settings.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fully resolved router settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Route used when the app boots at the root path or a route is unknown
    pub default_route: String,
    /// Route shown to unauthenticated sessions
    pub login_route: String,
    /// Path treated as "no route selected"
    pub root_path: String,
    /// Delay between history mutation and render, for exit animations
    pub exit_delay_ms: u64,
    /// Delay between render and clearing the loading transition
    pub settle_delay_ms: u64,
    /// Upper bound for a single view render (`None` waits forever)
    pub view_timeout_ms: Option<u64>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            default_route: "/dashboard".to_string(),
            login_route: "/login".to_string(),
            root_path: "/".to_string(),
            exit_delay_ms: 150,
            settle_delay_ms: 50,
            view_timeout_ms: Some(15_000),
        }
    }
}

impl RouterSettings {
    /// Settings with every artificial delay removed
    pub fn instant() -> Self {
        Self {
            exit_delay_ms: 0,
            settle_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Set the default route
    pub fn with_default_route(mut self, route: impl Into<String>) -> Self {
        self.default_route = route.into();
        self
    }

    /// Set the login route
    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Set the view timeout, `None` disables it
    pub fn with_view_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.view_timeout_ms = timeout.map(|t| t.as_millis() as u64);
        self
    }

    /// Remove the exit and settle delays
    pub fn without_animations(mut self) -> Self {
        self.exit_delay_ms = 0;
        self.settle_delay_ms = 0;
        self
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn view_timeout(&self) -> Option<Duration> {
        self.view_timeout_ms.map(Duration::from_millis)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("default_route", &self.default_route),
            ("login_route", &self.login_route),
            ("root_path", &self.root_path),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                });
            }
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }

        // Booting at the root would redirect to itself forever
        if self.default_route == self.root_path {
            return Err(ConfigError::InvalidValue {
                field: "default_route".to_string(),
                value: self.default_route.clone(),
            });
        }

        if self.view_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "view_timeout_ms".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = RouterSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_route, "/dashboard");
        assert_eq!(settings.view_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_relative_route_rejected() {
        let settings = RouterSettings::default().with_default_route("dashboard");
        match settings.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "default_route"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_default_route_cannot_be_root() {
        let settings = RouterSettings::default().with_default_route("/");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: RouterSettings =
            serde_json::from_str(r#"{"default_route": "/calendar", "view_timeout_ms": null}"#)
                .unwrap();
        assert_eq!(settings.default_route, "/calendar");
        assert_eq!(settings.login_route, "/login");
        assert_eq!(settings.exit_delay_ms, 150);
        assert_eq!(settings.view_timeout(), None);
    }
}
