//! Lexical path arithmetic.
//!
//! Nothing here touches the disk: `.` and `..` are folded purely on the
//! components, so results are stable for paths that do not exist yet.

use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` components without consulting the filesystem.
///
/// Leading `..` components of a relative path are kept, `..` directly under
/// the root of an absolute path is dropped, and an empty result becomes `.`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Normalizes an href string and renders it with `/` separators.
///
/// Used as a comparison key; fragments and query strings are treated as
/// literal path text.
#[must_use]
pub fn normalize_href(href: &str) -> String {
    to_slash(&normalize(Path::new(href)))
}

/// Computes the path of `target` as seen from the directory `base`.
///
/// Both paths are normalized first and must share absoluteness (both derive
/// from the same root in practice). Returns `.` when they are equal.
#[must_use]
pub fn relative_to(target: &Path, base: &Path) -> PathBuf {
    let target = normalize(target);
    let base = normalize(base);
    let target_parts: Vec<Component<'_>> =
        target.components().filter(|c| *c != Component::CurDir).collect();
    let base_parts: Vec<Component<'_>> =
        base.components().filter(|c| *c != Component::CurDir).collect();

    let common = target_parts.iter().zip(&base_parts).take_while(|(a, b)| a == b).count();

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &target_parts[common..] {
        out.push(part.as_os_str());
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Renders a path with `/` separators regardless of platform.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::RootDir => parts.push(String::new()),
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_string_lossy().into()),
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    match parts.as_slice() {
        [only] if only.is_empty() => "/".to_string(),
        _ => parts.join("/"),
    }
}

/// Renders `path` for display relative to `cwd`.
///
/// Relative paths are already relative to the working directory and are only
/// normalized; absolute paths are relativized against `cwd`.
#[must_use]
pub fn display_relative(path: &Path, cwd: &Path) -> String {
    if path.is_absolute() && cwd.is_absolute() {
        to_slash(&relative_to(path, cwd))
    } else {
        to_slash(&normalize(path))
    }
}
