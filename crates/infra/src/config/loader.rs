//! Configuration loader
//!
//! Loads engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CALSIFT_CLIENT_ID`: OAuth client id (required)
//! - `CALSIFT_CLIENT_SECRET`: OAuth client secret (required)
//! - `CALSIFT_REFRESH_TOKEN`: Long-lived refresh token (required)
//! - `CALSIFT_CALENDAR_IDS`: Comma-separated calendar ids (default `primary`)
//! - `CALSIFT_MAX_WINDOW_DAYS`: Largest window sent to the provider
//! - `CALSIFT_MAX_CONCURRENT_FETCHES`: Provider requests in flight per call
//! - `CALSIFT_HTTP_TIMEOUT_SECS`: Per-request timeout
//! - `CALSIFT_TOKEN_CACHE_TTL_SECS`: Enables the access-token cache
//! - `CALSIFT_TOKEN_URL` / `CALSIFT_API_BASE`: Endpoint overrides
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./calsift.json` or `./calsift.toml` (current working directory)
//! 2. `../calsift.json` or `../calsift.toml` (parent directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use calsift_domain::{CalSiftError, OAuthConfig, ResolverSettings, Result};
use serde::{Deserialize, Serialize};

use crate::http::client::DEFAULT_TIMEOUT_SECS;
use crate::integrations::google::GoogleEndpoints;

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

/// Everything needed to run a resolution against the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub oauth: OAuthConfig,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub endpoints: GoogleEndpoints,
    /// When set, access tokens are reused for at most this many seconds.
    #[serde(default)]
    pub token_cache_ttl_secs: Option<u64>,
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CalSiftError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<EngineConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The three credential variables must be present; everything else falls
/// back to its default.
///
/// # Errors
/// Returns `CalSiftError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<EngineConfig> {
    let client_id = env_var("CALSIFT_CLIENT_ID")?;
    let client_secret = env_var("CALSIFT_CLIENT_SECRET")?;
    let refresh_token = env_var("CALSIFT_REFRESH_TOKEN")?;
    let calendar_ids = std::env::var("CALSIFT_CALENDAR_IDS")
        .map(|raw| raw.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let oauth = OAuthConfig::new(client_id, client_secret, refresh_token, calendar_ids)?;

    let defaults = ResolverSettings::default();
    let resolver = ResolverSettings {
        max_window_days: env_parse("CALSIFT_MAX_WINDOW_DAYS")?.unwrap_or(defaults.max_window_days),
        max_concurrent_fetches: env_parse("CALSIFT_MAX_CONCURRENT_FETCHES")?
            .unwrap_or(defaults.max_concurrent_fetches),
    };

    let http = HttpSettings {
        timeout_secs: env_parse("CALSIFT_HTTP_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    let mut endpoints = GoogleEndpoints::default();
    if let Ok(token_url) = std::env::var("CALSIFT_TOKEN_URL") {
        endpoints.token_url = token_url;
    }
    if let Ok(api_base) = std::env::var("CALSIFT_API_BASE") {
        endpoints.api_base = api_base;
    }

    Ok(EngineConfig {
        oauth,
        resolver,
        http,
        endpoints,
        token_cache_ttl_secs: env_parse("CALSIFT_TOKEN_CACHE_TTL_SECS")?,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CalSiftError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<EngineConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CalSiftError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CalSiftError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CalSiftError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<EngineConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CalSiftError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CalSiftError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CalSiftError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("calsift.json"),
            cwd.join("calsift.toml"),
            cwd.join("../calsift.json"),
            cwd.join("../calsift.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![exe_dir.join("calsift.json"), exe_dir.join("calsift.toml")]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `CalSiftError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CalSiftError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `CalSiftError::Config` when the variable is set but does not
/// parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| CalSiftError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 10] = [
        "CALSIFT_CLIENT_ID",
        "CALSIFT_CLIENT_SECRET",
        "CALSIFT_REFRESH_TOKEN",
        "CALSIFT_CALENDAR_IDS",
        "CALSIFT_MAX_WINDOW_DAYS",
        "CALSIFT_MAX_CONCURRENT_FETCHES",
        "CALSIFT_HTTP_TIMEOUT_SECS",
        "CALSIFT_TOKEN_CACHE_TTL_SECS",
        "CALSIFT_TOKEN_URL",
        "CALSIFT_API_BASE",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn set_credentials() {
        std::env::set_var("CALSIFT_CLIENT_ID", "client-id");
        std::env::set_var("CALSIFT_CLIENT_SECRET", "client-secret");
        std::env::set_var("CALSIFT_REFRESH_TOKEN", "refresh-token");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_credentials();
        std::env::set_var("CALSIFT_CALENDAR_IDS", "primary, team@group.calendar.google.com");
        std::env::set_var("CALSIFT_MAX_WINDOW_DAYS", "30");
        std::env::set_var("CALSIFT_MAX_CONCURRENT_FETCHES", "4");
        std::env::set_var("CALSIFT_HTTP_TIMEOUT_SECS", "10");
        std::env::set_var("CALSIFT_TOKEN_CACHE_TTL_SECS", "600");
        std::env::set_var("CALSIFT_API_BASE", "http://127.0.0.1:8080/calendar/v3");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.as_ref().err());

        let config = result.unwrap();
        assert_eq!(config.oauth.client_id(), "client-id");
        assert_eq!(
            config.oauth.calendar_ids(),
            &["primary".to_string(), "team@group.calendar.google.com".to_string()]
        );
        assert_eq!(config.resolver.max_window_days, 30.0);
        assert_eq!(config.resolver.max_concurrent_fetches, 4);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.token_cache_ttl_secs, Some(600));
        assert_eq!(config.endpoints.api_base, "http://127.0.0.1:8080/calendar/v3");
        assert_eq!(config.endpoints.token_url, GoogleEndpoints::default().token_url);

        clear_env();
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_credentials();

        let config = load_from_env().unwrap();
        assert_eq!(config.oauth.calendar_ids(), &["primary".to_string()]);
        assert_eq!(config.resolver, ResolverSettings::default());
        assert_eq!(config.http, HttpSettings::default());
        assert_eq!(config.token_cache_ttl_secs, None);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("CALSIFT_CLIENT_ID", "client-id");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CalSiftError::Config(_)), "Should be a Config error");
        assert!(err.to_string().contains("CALSIFT_CLIENT_SECRET"));

        clear_env();
    }

    #[test]
    fn test_load_from_env_blank_credential() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_credentials();
        std::env::set_var("CALSIFT_REFRESH_TOKEN", "   ");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CalSiftError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_credentials();
        std::env::set_var("CALSIFT_MAX_CONCURRENT_FETCHES", "lots");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CalSiftError::Config(_)), "Should be a Config error");
        assert!(err.to_string().contains("CALSIFT_MAX_CONCURRENT_FETCHES"));

        clear_env();
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_content = r#"
            token_cache_ttl_secs = 300

            [oauth]
            client_id = "toml-client"
            client_secret = "toml-secret"
            refresh_token = "toml-refresh"
            calendar_ids = ["primary", "team"]

            [resolver]
            max_window_days = 60.0

            [http]
            timeout_secs = 5
        "#;

        let config = parse_config(toml_content, Path::new("calsift.toml")).unwrap();
        assert_eq!(config.oauth.client_id(), "toml-client");
        assert_eq!(config.oauth.calendar_ids().len(), 2);
        assert_eq!(config.resolver.max_window_days, 60.0);
        assert_eq!(config.resolver.max_concurrent_fetches, 1);
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.endpoints, GoogleEndpoints::default());
        assert_eq!(config.token_cache_ttl_secs, Some(300));
    }

    #[test]
    fn test_parse_config_rejects_missing_credential() {
        let json = r#"{"oauth": {"clientId": "id", "clientSecret": "secret"}}"#;
        let err = parse_config(json, Path::new("calsift.json")).unwrap_err();
        assert!(matches!(err, CalSiftError::Config(_)));
    }

    #[test]
    fn test_parse_config_unsupported_extension() {
        let err = parse_config("oauth: {}", Path::new("calsift.yaml")).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "oauth": {
                "clientId": "json-client",
                "clientSecret": "json-secret",
                "refreshToken": "json-refresh",
                "calendarIds": "primary,holidays"
            },
            "endpoints": {
                "token_url": "http://localhost:9999/token"
            }
        }"#;

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.oauth.refresh_token(), "json-refresh");
        assert_eq!(config.oauth.calendar_ids(), &["primary".to_string(), "holidays".to_string()]);
        assert_eq!(config.endpoints.token_url, "http://localhost:9999/token");
        assert_eq!(config.endpoints.api_base, GoogleEndpoints::default().api_base);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_missing_path() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/calsift.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
