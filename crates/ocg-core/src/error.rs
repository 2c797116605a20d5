use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0} (only 3.0 and 3.1 are supported)")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum DerefError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

/// Fatal conditions raised while turning a document into an `IrComponent`.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Deref(#[from] DerefError),

    #[error("unresolved reference {reference} in {location}; the document must be fully dereferenced")]
    UnresolvedReference { reference: String, location: String },

    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}

impl TransformError {
    pub(crate) fn unresolved(reference: &str, location: impl Into<String>) -> Self {
        TransformError::UnresolvedReference {
            reference: reference.to_string(),
            location: location.into(),
        }
    }
}
