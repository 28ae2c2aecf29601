//! Component-wise path operations used for navigation

use std::path::{Component, Path, PathBuf};
use vista_core::{Result, VistaError};

/// Lexically clean a path: drop `.` segments, fold `..` into its parent,
/// and never climb above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `path` against `base` when relative, then normalize
pub fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// True for a filesystem root (`/`, or a drive root on Windows)
pub fn is_root(path: &Path) -> bool {
    let path = normalize(path);
    path.has_root() && path.parent().is_none()
}

/// Parent directory, or `None` at the root
pub fn parent_of(path: &Path) -> Option<PathBuf> {
    normalize(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// Append a single entry name to a directory path.
///
/// `name` must be exactly one normal path segment: no separators, and not
/// `.` or `..`.
pub fn join(dir: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(segment)), None) if segment == name => Ok(dir.join(segment)),
        _ => Err(VistaError::InvalidPath(format!(
            "'{}' is not a single entry name",
            name
        ))),
    }
}
