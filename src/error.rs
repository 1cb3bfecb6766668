//! Error types for descriptor loading and resource document building.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning descriptors into resource documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid resource type \"{value}\": expected entity, collection, or rpc")]
    InvalidResourceType { value: String },

    #[error("unknown HTTP method \"{value}\"")]
    UnknownHttpMethod { value: String },

    #[error("resource {index} ({uri}) references unknown service \"{service}\"")]
    UnknownService {
        index: usize,
        uri: String,
        service: String,
    },
}

impl DocumentError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while loading a descriptor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid descriptor: {source}")]
    InvalidDescriptor {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config schema: {message}")]
    InvalidSchema { message: String },

    // Validation failures (exit code 1)
    #[error("config validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl ConfigError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::FileNotFound { .. } | ConfigError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            ConfigError::NetworkError { .. } => 3,
            ConfigError::Invalid { .. } => 1,
            ConfigError::Document(e) => e.exit_code(),
            _ => 2,
        }
    }
}

/// Single config validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the offending value.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
