//! Datasource override extraction for datamodel schema files.
//!
//! A datamodel declares its database connections in `datasource` blocks:
//!
//! ```text
//! datasource db {
//!   provider = "sqlite"
//!   url      = "file:./dev.db"
//! }
//! ```
//!
//! Relative SQLite URLs like the one above are resolved against the schema
//! directory, while the generated client lives somewhere else. This crate
//! scans the schema text and rewrites every relative `file:` URL into a path
//! that still points at the same database from the client's output
//! directory (or into an absolute path).
//!
//! - [`extract_sqlite_overrides`] — collect one [`DatasourceOverride`] per
//!   relative `file:` URL.
//! - [`absolutize_relative_path`] — resolve a single URL.
//! - [`datasource_names`] — list declared datasource identifiers.
//! - [`provider_blocks`] — list `datasource`/`generator` blocks with their
//!   providers.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use datamodel_overrides_core::extract_sqlite_overrides;
//!
//! let schema = r#"
//! datasource db {
//!   provider = "sqlite"
//!   url      = "file:./dev.db"
//! }
//! "#;
//!
//! let overrides = extract_sqlite_overrides(
//!     schema,
//!     Path::new("/project"),
//!     Path::new("/project/generated"),
//!     false,
//! )
//! .unwrap();
//!
//! assert_eq!(overrides.len(), 1);
//! assert_eq!(overrides[0].name, "db");
//! assert_eq!(overrides[0].url, "../dev.db");
//! ```

mod error;
mod extract;
mod resolve;
mod types;

pub use error::{DatamodelError, Result};
pub use extract::{datasource_names, extract_sqlite_overrides, provider_blocks};
pub use resolve::{absolutize_relative_path, normalize_path, relative_path};
pub use types::{BlockKind, DatasourceOverride, ProviderBlock};
