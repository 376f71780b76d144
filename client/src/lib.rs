//! Test-client bootstrap built on datasource overrides.
//!
//! Finds the schema file for a directory, reads it, and assembles a
//! [`ClientBootstrap`]: the schema location, declared datasource names and
//! the SQLite override list a test client is constructed with.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use datamodel_overrides_client::{BootstrapConfig, ClientBootstrap};
//!
//! let config = BootstrapConfig::load("bootstrap.yml").unwrap();
//! let bootstrap = ClientBootstrap::from_dir(Path::new("./prisma"), &config).unwrap();
//! for o in &bootstrap.sqlite_datasource_overrides {
//!     println!("{} -> {}", o.name, o.url);
//! }
//! ```

mod bootstrap;
mod config;
mod error;
mod locate;

pub use bootstrap::{
    CLIENT_GENERATOR_PROVIDER, CLIENT_TEST_VERSION, ClientBootstrap, ENGINE_TEST_VERSION,
};
pub use config::BootstrapConfig;
pub use error::{ClientError, Result};
pub use locate::{SCHEMA_FILE_NAME, SCHEMA_SUBDIR, locate_schema};
