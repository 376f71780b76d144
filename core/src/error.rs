//! Error types for datamodel scanning.

use thiserror::Error;

/// Fatal errors raised while scanning a datamodel for datasource overrides.
///
/// Either error aborts the whole extraction; no partial override list is
/// ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatamodelError {
    /// A relative `file:` URL was found with no block-opening line above it.
    #[error("Could not parse datamodel, invalid datasource block without opening `{{`")]
    MissingOpeningBrace,

    /// The block enclosing a `file:` URL is not a `datasource <name> {` header.
    #[error("Could not parse datamodel, line {line}: `{text}` is not parseable")]
    UnparseableLine {
        /// 1-based line number in the original schema text.
        line: usize,
        /// Raw text of the offending line.
        text: String,
    },
}

/// Convenience alias for results with [`DatamodelError`].
pub type Result<T> = std::result::Result<T, DatamodelError>;
