//! Configuration validation against the embedded config schema.

use serde_json::Value;

use crate::config::config_schema;
use crate::error::{ConfigError, SchemaError};

/// Validate a raw configuration document.
///
/// Collects every violation rather than stopping at the first.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` with one `SchemaError` per violation, or
/// `ConfigError::InvalidSchema` if the embedded schema fails to compile.
pub fn validate_config(config: &Value) -> Result<(), ConfigError> {
    let validator =
        jsonschema::validator_for(&config_schema()).map_err(|e| ConfigError::InvalidSchema {
            message: e.to_string(),
        })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(config)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid { errors })
    }
}
