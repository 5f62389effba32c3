//! Configuration loader
//!
//! Loads the client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SOMFY_CALLBACK_URL`: Callback URL registered for the application
//! - `SOMFY_CONSUMER_KEY`: Consumer key of the application
//! - `SOMFY_CONSUMER_SECRET`: Consumer secret of the application
//! - `SOMFY_API_URL`: Open API base URL (optional)
//! - `SOMFY_AUTH_URL`: OAuth base URL (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./somfy.json` or `./somfy.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location
//!
//! Every loaded configuration is validated before it is returned.

use std::path::{Path, PathBuf};

use somfy_domain::{ClientConfig, Result, SomfyError};

const FILE_NAMES: &[&str] = &["somfy.json", "somfy.toml", "config.json", "config.toml"];
const SEARCH_DIRS: &[&str] = &[".", "..", "../.."];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SomfyError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or invalid
pub fn load() -> Result<ClientConfig> {
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
/// # Errors
/// Returns `SomfyError::Config` if a required variable is missing or the
/// resulting configuration is invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(
        env_var("SOMFY_CALLBACK_URL")?,
        env_var("SOMFY_CONSUMER_KEY")?,
        env_var("SOMFY_CONSUMER_SECRET")?,
    );

    if let Some(url) = optional_env_var("SOMFY_API_URL") {
        config = config.with_api_base_url(url);
    }
    if let Some(url) = optional_env_var("SOMFY_AUTH_URL") {
        config = config.with_auth_base_url(url);
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SomfyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SomfyError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SomfyError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SomfyError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SomfyError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SomfyError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SomfyError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| {
            SEARCH_DIRS
                .iter()
                .flat_map(move |dir| FILE_NAMES.iter().map(move |name| root.join(dir).join(name)))
        })
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `SomfyError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key)
        .ok_or_else(|| SomfyError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use somfy_domain::constants::DEFAULT_API_BASE_URL;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: &[&str] = &[
        "SOMFY_CALLBACK_URL",
        "SOMFY_CONSUMER_KEY",
        "SOMFY_CONSUMER_SECRET",
        "SOMFY_API_URL",
        "SOMFY_AUTH_URL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn write_temp(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        (temp_file, path)
    }

    #[test]
    fn test_load_from_env_required_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SOMFY_CALLBACK_URL", "https://my.callback.url");
        std::env::set_var("SOMFY_CONSUMER_KEY", "a-consumer-key");
        std::env::set_var("SOMFY_CONSUMER_SECRET", "a-consumer-secret");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.callback_url, "https://my.callback.url");
        assert_eq!(config.consumer_key, "a-consumer-key");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        clear_env();
    }

    #[test]
    fn test_load_from_env_overrides_base_urls() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SOMFY_CALLBACK_URL", "https://my.callback.url");
        std::env::set_var("SOMFY_CONSUMER_KEY", "key");
        std::env::set_var("SOMFY_CONSUMER_SECRET", "secret");
        std::env::set_var("SOMFY_API_URL", "http://localhost:8080/api/v1");
        std::env::set_var("SOMFY_AUTH_URL", "http://localhost:8081/oauth");

        let config = load_from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.auth_base_url, "http://localhost:8081/oauth");

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SOMFY_CALLBACK_URL", "https://my.callback.url");

        let err = load_from_env().unwrap_err();
        assert!(
            matches!(&err, SomfyError::Config(msg) if msg.contains("SOMFY_CONSUMER_KEY")),
            "unexpected error: {err:?}"
        );

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("SOMFY_CALLBACK_URL", "https://my.callback.url");
        std::env::set_var("SOMFY_CONSUMER_KEY", "key");
        std::env::set_var("SOMFY_CONSUMER_SECRET", "secret");
        std::env::set_var("SOMFY_API_URL", "ftp://files.example");

        assert!(matches!(load_from_env(), Err(SomfyError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let (_temp, path) = write_temp(
            r#"{
                "callback_url": "https://my.callback.url",
                "consumer_key": "a-consumer-key",
                "consumer_secret": "a-consumer-secret"
            }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.consumer_key, "a-consumer-key");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let (_temp, path) = write_temp(
            r#"
api_base_url = "http://localhost:9000/api/v1"
callback_url = "https://my.callback.url"
consumer_key = "a-consumer-key"
consumer_secret = "a-consumer-secret"
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.consumer_secret, "a-consumer-secret");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_missing_required_field() {
        let (_temp, path) = write_temp(r#"{ "callback_url": "https://my.callback.url" }"#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(matches!(result, Err(SomfyError::Config(msg)) if msg.contains("Invalid JSON")));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/somfy.json")));
        assert!(matches!(result, Err(SomfyError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("somfy.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
