//! Line scanner for `datasource` blocks and relative SQLite URLs.
//!
//! The scan works on the schema's *filtered* lines: every line whose trimmed
//! text starts with `//` is dropped up front, and all later lookups (the
//! url-line and the backward search for its block header) index into that
//! filtered sequence. Each kept line remembers its position in the original
//! text so errors can point at the real line.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{DatamodelError, Result};
use crate::resolve::absolutize_relative_path;
use crate::types::{BlockKind, DatasourceOverride, ProviderBlock};

const LINE_COMMENT: &str = "//";

static PATTERNS: LazyLock<DatamodelPatterns> = LazyLock::new(DatamodelPatterns::new);

struct DatamodelPatterns {
    // url = "file:./dev.db" (but not file:/abs/path)
    sqlite_url: Regex,
    // datasource db {
    datasource_header: Regex,
    // datasource db {  /  generator client {
    provider_block_header: Regex,
    // provider = "sqlite"
    provider: Regex,
}

impl DatamodelPatterns {
    fn new() -> Self {
        Self {
            sqlite_url: Regex::new(r#"^\s*url\s*=\s*"(file:[^/"][^"]*)""#)
                .expect("static regex must compile"),
            // Identifiers are ASCII-only; `\w` would also admit Unicode letters.
            datasource_header: Regex::new(r"^\s*datasource\s+([A-Za-z0-9_]+)\s*\{")
                .expect("static regex must compile"),
            provider_block_header: Regex::new(
                r"^\s*(datasource|generator)\s+([A-Za-z0-9_]+)\s*\{",
            )
            .expect("static regex must compile"),
            provider: Regex::new(r#"^\s*provider\s*=\s*"([^"]*)""#)
                .expect("static regex must compile"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SchemaLine<'a> {
    /// 1-based line number in the unfiltered text.
    number: usize,
    text: &'a str,
}

fn filtered_lines(datamodel: &str) -> Vec<SchemaLine<'_>> {
    datamodel
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().starts_with(LINE_COMMENT))
        .map(|(index, text)| SchemaLine {
            number: index + 1,
            text,
        })
        .collect()
}

/// A `{` opens a block unless it sits behind a trailing `//` comment.
fn opens_block(text: &str) -> bool {
    let Some(brace) = text.find('{') else {
        return false;
    };
    text.find(LINE_COMMENT).is_none_or(|comment| comment > brace)
}

/// Collects one [`DatasourceOverride`] per relative SQLite `file:` URL.
///
/// For every `url = "file:<relative>"` line the nearest preceding line that
/// opens a block must be a `datasource <name> {` header; its name is paired
/// with the URL resolved through
/// [`absolutize_relative_path`](crate::absolutize_relative_path). Absolute
/// file URLs (`file:/...`), non-`file:` URLs and commented-out lines are
/// ignored. Overrides come back in the order their url-lines appear.
///
/// # Errors
///
/// - [`DatamodelError::MissingOpeningBrace`] when no block-opening line
///   precedes a matching url-line.
/// - [`DatamodelError::UnparseableLine`] when the enclosing block header is
///   not a datasource declaration.
///
/// Either error aborts the scan; no partial list is returned.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use datamodel_overrides_core::{DatamodelError, extract_sqlite_overrides};
///
/// let err = extract_sqlite_overrides(
///     "model User {\n  url = \"file:./x.db\"\n}",
///     Path::new("/p"),
///     Path::new("/p"),
///     false,
/// )
/// .unwrap_err();
/// assert!(matches!(err, DatamodelError::UnparseableLine { line: 1, .. }));
/// ```
pub fn extract_sqlite_overrides(
    datamodel: &str,
    cwd: &Path,
    output_dir: &Path,
    absolute_paths: bool,
) -> Result<Vec<DatasourceOverride>> {
    let lines = filtered_lines(datamodel);
    let mut overrides = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(url_match) = PATTERNS.sqlite_url.captures(line.text) else {
            continue;
        };

        let header = lines[..index]
            .iter()
            .rev()
            .find(|candidate| opens_block(candidate.text))
            .ok_or(DatamodelError::MissingOpeningBrace)?;

        let Some(header_match) = PATTERNS.datasource_header.captures(header.text) else {
            return Err(DatamodelError::UnparseableLine {
                line: header.number,
                text: header.text.to_string(),
            });
        };

        let name = &header_match[1];
        let url = absolutize_relative_path(&url_match[1], cwd, output_dir, absolute_paths);
        debug!(datasource = name, line = line.number, url = %url, "Collected SQLite override");
        overrides.push(DatasourceOverride::new(name, url));
    }

    Ok(overrides)
}

/// Lists the identifiers of every `datasource <name> {` header, in order.
///
/// Commented-out headers are skipped.
pub fn datasource_names(datamodel: &str) -> Vec<String> {
    filtered_lines(datamodel)
        .into_iter()
        .filter_map(|line| PATTERNS.datasource_header.captures(line.text))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Lists every `datasource` and `generator` block with its `provider`.
///
/// Blocks come back in source order. A block ends at the first line starting
/// with `}`; only the first string-valued `provider` inside it is kept, so
/// list-valued providers (`provider = ["a", "b"]`) leave it `None`.
///
/// # Examples
///
/// ```
/// use datamodel_overrides_core::{BlockKind, provider_blocks};
///
/// let blocks = provider_blocks(
///     "generator client {\n  provider = \"prisma-client-js\"\n}\n\
///      datasource db {\n  provider = \"sqlite\"\n}\n",
/// );
/// assert_eq!(blocks[0].kind, BlockKind::Generator);
/// assert_eq!(blocks[1].name, "db");
/// assert_eq!(blocks[1].provider.as_deref(), Some("sqlite"));
/// ```
pub fn provider_blocks(datamodel: &str) -> Vec<ProviderBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<ProviderBlock> = None;

    for line in filtered_lines(datamodel) {
        if let Some(caps) = PATTERNS.provider_block_header.captures(line.text) {
            blocks.extend(open.take());
            let kind = if &caps[1] == "datasource" {
                BlockKind::Datasource
            } else {
                BlockKind::Generator
            };
            open = Some(ProviderBlock {
                kind,
                name: caps[2].to_string(),
                provider: None,
            });
            continue;
        }

        if open.is_some() && line.text.trim_start().starts_with('}') {
            blocks.extend(open.take());
            continue;
        }

        if let Some(block) = open.as_mut() {
            if block.provider.is_none() {
                block.provider = PATTERNS
                    .provider
                    .captures(line.text)
                    .map(|caps| caps[1].to_string());
            }
        }
    }

    blocks.extend(open);
    blocks
}
