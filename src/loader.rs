//! Configuration loading from files, strings, and HTTP URLs.
//!
//! Every loader validates the raw JSON against the config schema before
//! deserializing it.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ConfigError;
use crate::validator::validate_config;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a configuration from a file path.
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if the file doesn't exist,
/// `ConfigError::InvalidJson` if it isn't JSON, and
/// `ConfigError::Invalid` if it doesn't match the config schema.
pub fn load_config(path: &Path) -> Result<ApiConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "loaded config file");
    load_config_str(&content)
}

/// Load a configuration from a JSON string.
///
/// # Errors
///
/// Returns `ConfigError::InvalidJson` if the string isn't valid JSON, or
/// `ConfigError::Invalid` if it doesn't match the config schema.
pub fn load_config_str(content: &str) -> Result<ApiConfig, ConfigError> {
    let value: Value =
        serde_json::from_str(content).map_err(|source| ConfigError::InvalidJson { source })?;
    config_from_value(value)
}

/// Load a configuration from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `ConfigError::NetworkError` if the request fails or the body
/// isn't JSON, or `ConfigError::Invalid` if it doesn't match the config schema.
#[cfg(feature = "remote")]
pub fn load_config_url(url: &str) -> Result<ApiConfig, ConfigError> {
    let network_error = |source| ConfigError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    let value: Value = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json())
        .map_err(network_error)?;

    debug!(url, "fetched remote config");
    config_from_value(value)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a configuration from a file path or URL.
///
/// URL loading requires the `remote` feature.
///
/// # Errors
///
/// Returns appropriate errors based on the source type.
pub fn load_config_auto(source: &str) -> Result<ApiConfig, ConfigError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_config_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(ConfigError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_config(Path::new(source))
    }
}

fn config_from_value(value: Value) -> Result<ApiConfig, ConfigError> {
    validate_config(&value)?;
    serde_json::from_value(value).map_err(|source| ConfigError::InvalidDescriptor { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const STATUS_CONFIG: &str = r#"{
        "services": { "Status": { "name": "Status" } },
        "resources": [
            { "service": "Status", "type": "collection", "uri": "/status", "operations": [{ "method": "GET" }] }
        ]
    }"#;

    #[test]
    fn load_config_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", STATUS_CONFIG).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.resources.len(), 1);
        assert_eq!(config.services["Status"].name(), "Status");
    }

    #[test]
    fn load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/api.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn load_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidJson { .. })));
    }

    #[test]
    fn load_config_str_schema_violation() {
        let result = load_config_str(r#"{ "services": {} }"#);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn is_url_detection() {
        assert!(is_url("https://example.com/api.json"));
        assert!(is_url("http://example.com/api.json"));
        assert!(!is_url("/path/to/api.json"));
        assert!(!is_url("api.json"));
    }

    #[test]
    fn load_config_auto_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", STATUS_CONFIG).unwrap();

        let config = load_config_auto(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.resources[0].uri, "/status");
    }

    #[cfg(feature = "remote")]
    mod remote {
        use super::*;

        #[test]
        fn load_config_url_valid() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/api.json")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(STATUS_CONFIG)
                .create();

            let config = load_config_url(&format!("{}/api.json", server.url())).unwrap();
            assert_eq!(config.resources.len(), 1);
            mock.assert();
        }

        #[test]
        fn load_config_url_404() {
            let mut server = mockito::Server::new();
            server.mock("GET", "/missing.json").with_status(404).create();

            let result = load_config_url(&format!("{}/missing.json", server.url()));
            assert!(matches!(result, Err(ConfigError::NetworkError { .. })));
        }

        #[test]
        fn load_config_auto_url() {
            let mut server = mockito::Server::new();
            server
                .mock("GET", "/api.json")
                .with_status(200)
                .with_body(STATUS_CONFIG)
                .create();

            let result = load_config_auto(&format!("{}/api.json", server.url()));
            assert!(result.is_ok());
        }
    }
}
