//! Separator-independent path handling.
//!
//! Relative locations (sub-directories, filter provenance) are kept internally as
//! forward-slash strings. They are only turned into host paths when joined onto
//! a real directory, so catalog results and planned outputs look the same on
//! every platform.

use std::path::{Component, Path, PathBuf};

/// Normalizes a slash- or backslash-separated path string.
///
/// Backslashes become `/`, duplicate separators and `.` segments are dropped and
/// `..` removes the preceding segment. A leading `/` and a trailing `/` are kept;
/// a relative path with no segments left normalizes to the empty string.
///
/// ```
/// use confgen::paths::normalize;
///
/// assert_eq!(normalize("a//b/./c/../d/"), "a/b/d/");
/// assert_eq!(normalize(r"env\prod\\web"), "env/prod/web");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let trailing = unified.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut normalized = String::with_capacity(unified.len());
    if absolute {
        normalized.push('/');
    }
    normalized.push_str(&segments.join("/"));
    if trailing && !segments.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Renders the normal components of a relative path as a `/`-joined string.
pub fn to_slash_string<P: AsRef<Path>>(path: P) -> String {
    let segments: Vec<String> = path
        .as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    normalize(&segments.join("/"))
}

/// Normalizes `dir` into a sub-directory string that is either empty or ends in `/`.
pub fn as_sub_directory(dir: &str) -> String {
    let mut normalized = normalize(dir);
    if !normalized.is_empty() && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Joins normalized relative segments onto `base` using the host separator.
///
/// Each segment may itself contain `/`-separated parts; empty parts vanish.
pub fn join_segments<P: AsRef<Path>>(base: P, segments: &[&str]) -> PathBuf {
    let mut joined = base.as_ref().to_path_buf();
    for segment in segments {
        let normalized = normalize(segment);
        for part in normalized.split('/').filter(|part| !part.is_empty()) {
            if part == ".." {
                joined.pop();
            } else {
                joined.push(part);
            }
        }
    }
    joined
}
