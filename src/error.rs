use std::error::Error;
use thiserror::Error;

/// Error type returned by custom schema providers.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Why a type could not be turned into a mapping.
///
/// `path` is the dotted chain of serialized field names from the root type,
/// empty when the root itself failed.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("at {path}: unsupported type {kind}")]
    UnsupportedType {
        kind: &'static str,
        path: String,
    },

    #[error("at {path}: error from custom schema provider: {source}")]
    Provider {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("at {path}: recursive type {name} is not supported")]
    RecursiveType {
        name: &'static str,
        path: String,
    },
}

impl GenerateError {
    pub fn path(&self) -> &str {
        match self {
            GenerateError::UnsupportedType { path, .. } => path,
            GenerateError::Provider { path, .. } => path,
            GenerateError::RecursiveType { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize mapping: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write mapping file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
