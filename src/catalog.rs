//! Recursive discovery of filter and template files.
//!
//! A [`PathCatalog`] walks a scan root and describes every regular file it finds
//! as a [`CatalogEntry`]: where the file is, its name without extension and the
//! directory it sits in relative to the scan root.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::paths::{as_sub_directory, normalize, to_slash_string};

/// One file discovered under a scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Absolute location of the file.
    pub absolute_path: PathBuf,
    /// File name including its extension.
    pub file_name: String,
    /// File name with the last extension removed.
    pub name_without_extension: String,
    /// Containing directory relative to the scan root, `/`-separated and
    /// ending in `/`; empty for files directly in the root.
    pub relative_sub_directory: String,
    /// Whether this is a template living in the deploy directory.
    pub is_deploy_root: bool,
}

impl CatalogEntry {
    /// The file's location relative to the scan root, `/`-separated.
    pub fn relative_path(&self) -> String {
        format!("{}{}", self.relative_sub_directory, self.file_name)
    }
}

/// One ignore-list entry.
///
/// Files are walked with symlinks kept in their paths, so an entry is matched
/// both as written (ancestors resolved, last component kept) and fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredPath {
    /// Absolute entry with its parent directory canonicalized.
    pub as_given: PathBuf,
    /// Entry with every symlink resolved.
    pub resolved: PathBuf,
}

impl IgnoredPath {
    fn from_entry(raw: &str) -> Option<Self> {
        let candidate = PathBuf::from(normalize(raw));
        // Existence without following a trailing symlink.
        if candidate.symlink_metadata().is_err() {
            debug!("Ignore entry does not exist: {}", candidate.display());
            return None;
        }
        let absolute = if candidate.is_absolute() {
            candidate
        } else {
            std::env::current_dir().ok()?.join(candidate)
        };
        let as_given = match (absolute.parent(), absolute.file_name()) {
            (Some(parent), Some(name)) => dunce::canonicalize(parent)
                .map(|parent| parent.join(name))
                .unwrap_or_else(|_| absolute.clone()),
            _ => absolute.clone(),
        };
        let resolved = dunce::canonicalize(&absolute).unwrap_or_else(|_| as_given.clone());
        Some(Self { as_given, resolved })
    }

    fn matches(&self, path: &Path, resolved_path: Option<&Path>) -> bool {
        path.starts_with(&self.as_given)
            || path.starts_with(&self.resolved)
            || resolved_path.is_some_and(|resolved| resolved.starts_with(&self.resolved))
    }
}

/// Scanner for a single kind of input (filters or templates).
#[derive(Debug, Default)]
pub struct PathCatalog {
    ignored: Vec<IgnoredPath>,
    deploy_dir: Option<String>,
}

impl PathCatalog {
    /// Creates a catalog that skips every file under one of `ignore_list`.
    ///
    /// Entries are trimmed and de-duplicated; blank entries and entries that do not
    /// exist on disk are dropped.
    pub fn new<S: AsRef<str>>(ignore_list: &[S]) -> Self {
        let mut ignored: Vec<IgnoredPath> = Vec::with_capacity(ignore_list.len());
        for raw in ignore_list {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            if let Some(entry) = IgnoredPath::from_entry(raw) {
                if !ignored.contains(&entry) {
                    debug!("Adding ignore for: {}", entry.as_given.display());
                    ignored.push(entry);
                }
            }
        }
        Self { ignored, deploy_dir: None }
    }

    /// Flags entries whose relative sub-directory equals `deploy_dir` as deploy roots.
    pub fn with_deploy_dir<S: AsRef<str>>(mut self, deploy_dir: S) -> Self {
        self.deploy_dir = Some(as_sub_directory(deploy_dir.as_ref()));
        self
    }

    /// The ignore entries in effect.
    pub fn ignored(&self) -> &[IgnoredPath] {
        &self.ignored
    }

    /// Whether `path` lies under (or is) one of the ignored locations.
    ///
    /// Matching is by whole path components, so `filters/personal` does not
    /// exclude `filters/personal-old`. A path reached through a symlink is
    /// matched under its walked name and under its resolved location.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.ignored.is_empty() {
            return false;
        }
        let resolved = dunce::canonicalize(path).ok();
        self.ignored
            .iter()
            .any(|entry| entry.matches(path, resolved.as_deref()))
    }

    /// Scans `root`, logging a warning and returning nothing when it is missing.
    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<Vec<CatalogEntry>> {
        let root = root.as_ref();
        if !root.exists() {
            warn!("Directory does not exist: {}", root.display());
            return Ok(Vec::new());
        }
        self.collect(root)
    }

    /// Scans `root`, failing with [`Error::DirectoryNotFound`] when it is missing.
    pub fn scan_strict<P: AsRef<Path>>(&self, root: P) -> Result<Vec<CatalogEntry>> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(Error::DirectoryNotFound { path: root.to_path_buf() });
        }
        self.collect(root)
    }

    fn collect(&self, root: &Path) -> Result<Vec<CatalogEntry>> {
        debug!("Scanning directory: {}", root.display());
        let canonical_root = dunce::canonicalize(root)
            .map_err(|_| Error::DirectoryNotFound { path: root.to_path_buf() })?;

        let mut entries = Vec::new();
        let walker = WalkDir::new(&canonical_root)
            .follow_links(true)
            .sort_by_file_name();
        for dir_entry in walker {
            let dir_entry = dir_entry
                .map_err(|source| Error::ScanError { path: root.to_path_buf(), source })?;
            if !dir_entry.file_type().is_file() {
                continue;
            }
            let path = dir_entry.path();
            if self.is_ignored(path) {
                info!("Ignoring: {}", path.display());
                continue;
            }
            debug!("Adding file: {}", path.display());
            entries.push(self.describe(&canonical_root, path));
        }

        if entries.is_empty() {
            warn!("No files found in directory: {}", root.display());
        }
        Ok(entries)
    }

    fn describe(&self, canonical_root: &Path, path: &Path) -> CatalogEntry {
        let parent = path.parent().unwrap_or(canonical_root);
        let relative = parent.strip_prefix(canonical_root).unwrap_or(Path::new(""));
        let relative_sub_directory = as_sub_directory(&to_slash_string(relative));

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name_without_extension = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_deploy_root = self
            .deploy_dir
            .as_deref()
            .is_some_and(|deploy| deploy == relative_sub_directory);

        CatalogEntry {
            absolute_path: path.to_path_buf(),
            file_name,
            name_without_extension,
            relative_sub_directory,
            is_deploy_root,
        }
    }
}
