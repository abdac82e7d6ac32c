//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`--config` or `<config_dir>/listing-locator/config.toml`), then
//! `LOCATOR_*` environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::location::{LocationError, UnknownStatePolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Base URL of the geocoding proxy; `/geocode` is appended.
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// IP geolocation endpoint used as a coarse position fix.
    pub ip_lookup_url: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 10,
            user_agent: concat!("ListingLocator/", env!("CARGO_PKG_VERSION")).into(),
            ip_lookup_url: "https://ipapi.co/json/".into(),
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub max_suggestions: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_chars: 3,
            max_suggestions: 5,
        }
    }
}

impl SuggestionConfig {
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub geocoder: GeocoderConfig,
    pub suggestions: SuggestionConfig,
    pub unknown_state: UnknownStatePolicy,
    pub server: ServerConfig,
}

impl LocatorConfig {
    /// Load from an explicit path (must exist) or the default location
    /// (optional), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, LocationError> {
        let mut config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::load_from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LocationError> {
        let content = fs::read_to_string(path).map_err(|e| {
            LocationError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            LocationError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("listing-locator").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) -> Result<(), LocationError> {
        if let Ok(url) = env::var("LOCATOR_GEOCODER_URL") {
            self.geocoder.base_url = url;
        }
        if let Ok(val) = env::var("LOCATOR_TIMEOUT_SECS") {
            self.geocoder.timeout_secs = parse_env("LOCATOR_TIMEOUT_SECS", &val)?;
        }
        if let Ok(val) = env::var("LOCATOR_DEBOUNCE_MS") {
            self.suggestions.debounce_ms = parse_env("LOCATOR_DEBOUNCE_MS", &val)?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, LocationError> {
    val.trim()
        .parse()
        .map_err(|_| LocationError::Config(format!("{} must be a non-negative integer, got '{}'", key, val)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LocatorConfig::default();
        assert_eq!(config.suggestions.min_query_chars, 3);
        assert_eq!(config.suggestions.quiet_period(), Duration::from_millis(300));
        assert_eq!(config.unknown_state, UnknownStatePolicy::DefaultToFirst);
        assert_eq!(config.geocoder.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
unknown_state = "reject"

[geocoder]
base_url = "https://api.example.ng"

[suggestions]
debounce_ms = 350
"#,
        )
        .unwrap();

        let config = LocatorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.geocoder.base_url, "https://api.example.ng");
        assert_eq!(config.geocoder.timeout_secs, 10);
        assert_eq!(config.suggestions.debounce_ms, 350);
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.unknown_state, UnknownStatePolicy::Reject);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = LocatorConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, LocationError::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[suggestions]\ndebounce_ms = \"soon\"\n").unwrap();
        assert!(LocatorConfig::load_from_file(&path).is_err());
    }

    /// Env vars are process-wide; every test that sets them holds this lock.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const OVERRIDE_KEYS: [&str; 3] = ["LOCATOR_GEOCODER_URL", "LOCATOR_TIMEOUT_SECS", "LOCATOR_DEBOUNCE_MS"];

    fn clear_overrides() {
        for key in OVERRIDE_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_env_overrides_beat_file_values() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[geocoder]
base_url = "https://file.example.ng"
timeout_secs = 4

[suggestions]
debounce_ms = 350
max_suggestions = 8
"#,
        )
        .unwrap();

        clear_overrides();
        let from_file = LocatorConfig::load(Some(&path)).unwrap();
        assert_eq!(from_file.geocoder.base_url, "https://file.example.ng");
        assert_eq!(from_file.geocoder.timeout_secs, 4);
        assert_eq!(from_file.suggestions.debounce_ms, 350);

        env::set_var("LOCATOR_GEOCODER_URL", "http://127.0.0.1:9000");
        env::set_var("LOCATOR_TIMEOUT_SECS", "2");
        env::set_var("LOCATOR_DEBOUNCE_MS", " 150 ");
        let overridden = LocatorConfig::load(Some(&path));
        clear_overrides();

        let config = overridden.unwrap();
        assert_eq!(config.geocoder.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.geocoder.timeout_secs, 2);
        assert_eq!(config.suggestions.debounce_ms, 150);
        assert_eq!(config.suggestions.max_suggestions, 8);
    }

    #[test]
    fn test_non_integer_env_override_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        clear_overrides();
        env::set_var("LOCATOR_DEBOUNCE_MS", "soon");
        let result = LocatorConfig::load(Some(&path));
        clear_overrides();

        match result {
            Err(LocationError::Config(msg)) => assert!(msg.contains("LOCATOR_DEBOUNCE_MS")),
            other => panic!("expected a config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_env() {
        assert_eq!(parse_env::<u64>("X", " 250 ").unwrap(), 250);
        assert!(parse_env::<u64>("X", "-1").is_err());
    }
}
