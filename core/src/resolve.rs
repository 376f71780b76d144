//! Lexical path resolution for SQLite `file:` URLs.
//!
//! Nothing here touches the filesystem: paths are joined and normalized
//! component by component, so targets that do not exist yet (a database the
//! client will create on first connect) resolve the same as existing ones.

use std::path::{Component, Path, PathBuf};

const FILE_SCHEME: &str = "file:";

/// Resolves a SQLite `file:` URL against `cwd`.
///
/// Strips one leading `file:` prefix, joins the remainder onto `cwd` and
/// normalizes the result. With `absolute_paths` the normalized absolute path
/// is returned; otherwise the path is expressed relative to `output_dir`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use datamodel_overrides_core::absolutize_relative_path;
///
/// let cwd = Path::new("/project");
/// let out = Path::new("/project/generated");
/// assert_eq!(absolutize_relative_path("file:./dev.db", cwd, out, false), "../dev.db");
/// assert_eq!(absolutize_relative_path("file:./dev.db", cwd, out, true), "/project/dev.db");
/// ```
pub fn absolutize_relative_path(
    url: &str,
    cwd: &Path,
    output_dir: &Path,
    absolute_paths: bool,
) -> String {
    let file_path = url.strip_prefix(FILE_SCHEME).unwrap_or(url);
    let absolute_target = normalize_path(&cwd.join(file_path));

    if absolute_paths {
        return absolute_target.to_string_lossy().into_owned();
    }

    relative_path(output_dir, &absolute_target)
        .to_string_lossy()
        .into_owned()
}

/// Lexically normalizes `path`, folding `.` and `..` components.
///
/// A `..` directly under the root is dropped (`/..` is `/`). Leading `..`
/// components of a relative path are kept since there is nothing to fold
/// them into. An empty result becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Returns the path that leads from `from` to `to`.
///
/// Both inputs are normalized first. The shared leading components are
/// dropped, one `..` is emitted per remaining component of `from`, and the
/// rest of `to` is appended. Identical inputs yield an empty path.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use datamodel_overrides_core::relative_path;
///
/// assert_eq!(
///     relative_path(Path::new("/a/b/c"), Path::new("/a/d/e.db")),
///     PathBuf::from("../../d/e.db")
/// );
/// assert_eq!(relative_path(Path::new("/a"), Path::new("/a")), PathBuf::new());
/// ```
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize_path(from);
    let to = normalize_path(to);

    let from_parts: Vec<Component<'_>> = from
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to_parts: Vec<Component<'_>> = to
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let shared = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in shared..from_parts.len() {
        result.push(Component::ParentDir);
    }
    for part in &to_parts[shared..] {
        result.push(part);
    }
    result
}
