//! Dispatcher configuration, loaded from TOML.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::error::{ConfigParseSnafu, ConfigReadSnafu, Error, Result};

/// What `/` resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootTarget {
    /// `/` shows the `index` view.
    #[default]
    Index,
    /// `/` runs the `/login` handler.
    Login,
}

/// Where the route path lives in a location string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// The path component (`/login?x#y` → `/login`).
    #[default]
    Html5,
    /// The fragment (`/#/login` → `/login`).
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavConfig {
    pub root: RootTarget,
    pub history: HistoryMode,
    /// Route name shown for unmatched paths. Unset keeps unmatched paths
    /// a silent no-op.
    pub not_found: Option<String>,
    /// Page transition duration handed to the presentation layer.
    pub transition_duration: String,
    /// Location dispatched at startup.
    pub initial_path: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            root: RootTarget::Index,
            history: HistoryMode::Html5,
            not_found: None,
            transition_duration: "0.2s".to_string(),
            initial_path: "/".to_string(),
        }
    }
}

impl NavConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(content).context(ConfigParseSnafu)?;
        config.transition()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context(ConfigReadSnafu { path })?;
        Self::from_toml(&content)
    }

    /// `transition_duration` as a [`Duration`].
    pub fn transition(&self) -> Result<Duration> {
        parse_duration(&self.transition_duration)
    }
}

/// Parse `"<n>s"` or `"<n>ms"`; `n` may be fractional.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let invalid = || Error::InvalidDuration {
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let (number, scale) = if let Some(n) = trimmed.strip_suffix("ms") {
        (n, 1e-3)
    } else if let Some(n) = trimmed.strip_suffix('s') {
        (n, 1.0)
    } else {
        return Err(invalid());
    };
    let n: f64 = number.trim().parse().map_err(|_| invalid())?;
    let nanos = (n * scale * 1e9).round();
    if !nanos.is_finite() || nanos < 0.0 || nanos >= u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(Duration::from_nanos(nanos as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavConfig::default();
        assert_eq!(config.root, RootTarget::Index);
        assert_eq!(config.history, HistoryMode::Html5);
        assert_eq!(config.not_found, None);
        assert_eq!(config.transition().unwrap(), Duration::from_millis(200));
        assert_eq!(config.initial_path, "/");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(NavConfig::from_toml("").unwrap(), NavConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = NavConfig::from_toml(
            r#"
            root = "login"
            history = "hash"
            not_found = "not-found"
            transition_duration = "350ms"
            initial_path = "/#/user"
            "#,
        )
        .unwrap();
        assert_eq!(config.root, RootTarget::Login);
        assert_eq!(config.history, HistoryMode::Hash);
        assert_eq!(config.not_found.as_deref(), Some("not-found"));
        assert_eq!(config.transition().unwrap(), Duration::from_millis(350));
        assert_eq!(config.initial_path, "/#/user");
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(matches!(
            NavConfig::from_toml(r#"root = "home""#),
            Err(Error::ConfigParse { .. })
        ));
        assert!(matches!(
            NavConfig::from_toml(r#"transition_duration = "fast""#),
            Err(Error::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("0.2s").unwrap(), Duration::from_millis(200));
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration(" 15ms ").unwrap(), Duration::from_millis(15));
        assert!(parse_duration("-1s").is_err());
        assert!(parse_duration("2").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = NavConfig::load(Path::new("/nonexistent/soyfr.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
