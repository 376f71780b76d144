//! Schema file lookup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ClientError, Result};

/// Conventional schema file name.
pub const SCHEMA_FILE_NAME: &str = "schema.prisma";

/// Subdirectory checked when the schema is not at the top level.
pub const SCHEMA_SUBDIR: &str = "prisma";

const PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageJson {
    prisma: Option<PackageSchemaConfig>,
}

#[derive(Debug, Deserialize)]
struct PackageSchemaConfig {
    schema: Option<String>,
}

/// Reads the `prisma.schema` entry of `dir/package.json`, if any.
fn package_json_schema(dir: &Path) -> Result<Option<PathBuf>> {
    let path = dir.join(PACKAGE_JSON);
    if !path.is_file() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)?;
    let package: PackageJson = serde_json::from_str(&raw)?;
    Ok(package
        .prisma
        .and_then(|p| p.schema)
        .map(|schema| dir.join(schema)))
}

/// Finds the schema file for `dir`.
///
/// Candidates, first existing file wins:
///
/// 1. the `prisma.schema` path declared in `dir/package.json`
/// 2. `dir/schema.prisma`
/// 3. `dir/prisma/schema.prisma`
///
/// # Errors
///
/// Returns [`ClientError::SchemaNotFound`] when no candidate exists,
/// [`ClientError::Json`] for an unreadable `package.json`.
pub fn locate_schema(dir: &Path) -> Result<PathBuf> {
    let mut candidates = Vec::with_capacity(3);
    candidates.extend(package_json_schema(dir)?);
    candidates.push(dir.join(SCHEMA_FILE_NAME));
    candidates.push(dir.join(SCHEMA_SUBDIR).join(SCHEMA_FILE_NAME));

    for candidate in candidates {
        debug!(path = %candidate.display(), "Checking schema candidate");
        if candidate.is_file() {
            info!(path = %candidate.display(), "Located schema");
            return Ok(candidate);
        }
    }

    Err(ClientError::SchemaNotFound(dir.to_path_buf()))
}
