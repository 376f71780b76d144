use serde::{Deserialize, Serialize};

/// A resolved SQLite file location for one named datasource.
///
/// Produced by [`extract_sqlite_overrides`](crate::extract_sqlite_overrides)
/// and handed to the client constructor, which substitutes `url` for the
/// relative `file:` URL written in the schema.
///
/// # Examples
///
/// ```
/// use datamodel_overrides_core::DatasourceOverride;
///
/// let o = DatasourceOverride::new("db", "../dev.db");
/// assert_eq!(o.name, "db");
/// assert_eq!(o.url, "../dev.db");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceOverride {
    /// Datasource identifier from the `datasource <name> {` header.
    pub name: String,
    /// Resolved path (absolute, or relative to the output directory).
    pub url: String,
}

impl DatasourceOverride {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Configuration block kinds that declare a `provider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Datasource,
    Generator,
}

/// A `datasource` or `generator` block and its string `provider`, if any.
///
/// Produced by [`provider_blocks`](crate::provider_blocks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderBlock {
    pub kind: BlockKind,
    pub name: String,
    pub provider: Option<String>,
}
