//! Error types for test-client bootstrap operations.

use std::path::PathBuf;

use datamodel_overrides_core::DatamodelError;
use thiserror::Error;

/// Errors that can occur while locating a schema or assembling a bootstrap.
#[derive(Debug, Error)]
pub enum ClientError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `package.json` could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bootstrap config could not be parsed or written.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Datasource override extraction failed.
    #[error(transparent)]
    Datamodel(#[from] DatamodelError),

    /// No schema file was found in the searched directory.
    #[error("could not find a schema file in '{}'", .0.display())]
    SchemaNotFound(PathBuf),

    /// The schema declares no datasource block.
    #[error("schema '{}' declares no datasource", .0.display())]
    NoDatasource(PathBuf),

    /// The first datasource block has no string `provider`.
    #[error("datasource '{0}' declares no provider")]
    NoProvider(String),
}

/// Convenience alias for results with [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;
