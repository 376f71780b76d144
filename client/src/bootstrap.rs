//! Test-client bootstrap descriptor.

use std::path::{Path, PathBuf};

use datamodel_overrides_core::{
    BlockKind, DatasourceOverride, datasource_names, extract_sqlite_overrides, normalize_path,
    provider_blocks, relative_path,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BootstrapConfig;
use crate::error::{ClientError, Result};
use crate::locate::locate_schema;

/// Client version reported by test clients.
pub const CLIENT_TEST_VERSION: &str = "client-test-version";

/// Engine version reported by test clients.
pub const ENGINE_TEST_VERSION: &str = "engine-test-version";

/// Provider of the generator block a test client is built for.
pub const CLIENT_GENERATOR_PROVIDER: &str = "prisma-client-js";

/// Everything a test-client constructor needs to know about a schema,
/// short of the engine-derived document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientBootstrap {
    /// Schema file the descriptor was built from.
    pub schema_path: PathBuf,
    /// Directory containing the schema; relative `file:` URLs resolve here.
    pub dirname: PathBuf,
    /// Path from the output directory back to `dirname`.
    pub relative_path: String,
    /// Name of the generator block whose provider is
    /// [`CLIENT_GENERATOR_PROVIDER`], if the schema has one.
    pub generator: Option<String>,
    /// Declared datasource identifiers, in source order.
    pub datasource_names: Vec<String>,
    /// `provider` of the first datasource block.
    pub active_provider: String,
    /// Rewritten SQLite locations for relative `file:` URLs.
    pub sqlite_datasource_overrides: Vec<DatasourceOverride>,
    pub client_version: String,
    pub engine_version: String,
}

impl ClientBootstrap {
    /// Builds the descriptor for `config.schema_dir`, or the process working
    /// directory when it is unset.
    ///
    /// # Errors
    ///
    /// Same as [`from_dir`](Self::from_dir).
    pub fn from_config(config: &BootstrapConfig) -> Result<Self> {
        let dir = config.schema_dir.as_deref().unwrap_or(Path::new("."));
        Self::from_dir(dir, config)
    }

    /// Locates and reads the schema under `dir`, then builds the descriptor.
    ///
    /// `dir` and the configured output directory are made absolute against
    /// the process working directory and normalized first. `dir` takes
    /// precedence over `config.schema_dir`.
    ///
    /// # Errors
    ///
    /// Propagates lookup and read failures, datamodel scan errors,
    /// [`ClientError::NoDatasource`] for schemas without a datasource and
    /// [`ClientError::NoProvider`] when the first datasource has no string
    /// provider.
    pub fn from_dir(dir: &Path, config: &BootstrapConfig) -> Result<Self> {
        let dir = normalize_path(&std::path::absolute(dir)?);
        let schema_path = locate_schema(&dir)?;
        let datamodel = std::fs::read_to_string(&schema_path)?;
        let schema_dir = schema_path
            .parent()
            .map_or_else(|| dir.clone(), Path::to_path_buf);

        let mut config = config.clone();
        if let Some(output_dir) = config.output_dir.take() {
            config.output_dir = Some(normalize_path(&std::path::absolute(output_dir)?));
        }

        Self::from_datamodel(&datamodel, schema_path, &schema_dir, &config)
    }

    /// Builds the descriptor from schema text already in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use datamodel_overrides_client::{BootstrapConfig, ClientBootstrap};
    ///
    /// let schema = "datasource db {\n  provider = \"sqlite\"\n  url = \"file:./dev.db\"\n}\n";
    /// let config = BootstrapConfig {
    ///     output_dir: Some("/app/generated".into()),
    ///     ..Default::default()
    /// };
    /// let bootstrap = ClientBootstrap::from_datamodel(
    ///     schema,
    ///     "/app/schema.prisma",
    ///     Path::new("/app"),
    ///     &config,
    /// )
    /// .unwrap();
    /// assert_eq!(bootstrap.relative_path, "..");
    /// assert_eq!(bootstrap.active_provider, "sqlite");
    /// assert_eq!(bootstrap.sqlite_datasource_overrides[0].url, "../dev.db");
    /// ```
    pub fn from_datamodel(
        datamodel: &str,
        schema_path: impl Into<PathBuf>,
        schema_dir: &Path,
        config: &BootstrapConfig,
    ) -> Result<Self> {
        let schema_path = schema_path.into();
        let output_dir = config.output_dir.as_deref().unwrap_or(schema_dir);

        let names = datasource_names(datamodel);
        let blocks = provider_blocks(datamodel);
        let Some(first_datasource) = blocks.iter().find(|b| b.kind == BlockKind::Datasource)
        else {
            return Err(ClientError::NoDatasource(schema_path));
        };
        let active_provider = first_datasource
            .provider
            .clone()
            .ok_or_else(|| ClientError::NoProvider(first_datasource.name.clone()))?;
        let generator = blocks
            .iter()
            .find(|b| {
                b.kind == BlockKind::Generator
                    && b.provider.as_deref() == Some(CLIENT_GENERATOR_PROVIDER)
            })
            .map(|b| b.name.clone());

        let overrides =
            extract_sqlite_overrides(datamodel, schema_dir, output_dir, config.absolute_paths)?;
        debug!(
            schema = %schema_path.display(),
            datasources = names.len(),
            provider = %active_provider,
            overrides = overrides.len(),
            "Assembled client bootstrap"
        );

        Ok(Self {
            relative_path: relative_path(output_dir, schema_dir)
                .to_string_lossy()
                .into_owned(),
            dirname: schema_dir.to_path_buf(),
            schema_path,
            generator,
            datasource_names: names,
            active_provider,
            sqlite_datasource_overrides: overrides,
            client_version: CLIENT_TEST_VERSION.to_string(),
            engine_version: ENGINE_TEST_VERSION.to_string(),
        })
    }
}
