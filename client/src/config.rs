//! Bootstrap configuration file.
//!
//! # Example YAML
//!
//! ```yaml
//! schema_dir: ./prisma
//! output_dir: ./generated
//! absolute_paths: false
//! ```
//!
//! Every field is optional. Relative paths are taken as given, i.e. relative
//! to the process working directory rather than to the config file.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for assembling a [`ClientBootstrap`](crate::ClientBootstrap).
///
/// # Examples
///
/// ```
/// # use datamodel_overrides_client::BootstrapConfig;
/// let config: BootstrapConfig = serde_yaml::from_str("absolute_paths: true").unwrap();
/// assert!(config.absolute_paths);
/// assert!(config.output_dir.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Directory searched for the schema file by
    /// [`ClientBootstrap::from_config`](crate::ClientBootstrap::from_config).
    /// An explicit directory passed to
    /// [`ClientBootstrap::from_dir`](crate::ClientBootstrap::from_dir) wins.
    pub schema_dir: Option<PathBuf>,
    /// Directory the generated client lives in (defaults to the schema
    /// directory).
    pub output_dir: Option<PathBuf>,
    /// Emit absolute SQLite paths instead of output-relative ones.
    pub absolute_paths: bool,
}

impl BootstrapConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ClientError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::ClientError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ClientError::Io) if the file cannot be written,
    /// or [`Yaml`](crate::ClientError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
schema_dir: ./prisma
output_dir: /tmp/generated
absolute_paths: true
"#;
        let config: BootstrapConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.schema_dir, Some(PathBuf::from("./prisma")));
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/generated")));
        assert!(config.absolute_paths);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: BootstrapConfig = serde_yaml::from_str("output_dir: out").unwrap();
        assert_eq!(config.schema_dir, None);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert!(!config.absolute_paths);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bootstrap.yml");

        let original = BootstrapConfig {
            schema_dir: Some(PathBuf::from("prisma")),
            output_dir: None,
            absolute_paths: true,
        };
        original.save(&path).unwrap();

        let loaded = BootstrapConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BootstrapConfig::load(dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, crate::ClientError::Io(_)));
    }
}
