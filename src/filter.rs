//! Loading filter files into substitution values.

use indexmap::IndexMap;
use log::debug;

use crate::catalog::CatalogEntry;
use crate::constants::FILTER_SOURCE_KEY;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::paths::normalize;
use crate::properties::parse_properties;

/// Ordered placeholder values loaded from one filter.
///
/// Always contains [`FILTER_SOURCE_KEY`]. Not modified once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterValueSet {
    values: IndexMap<String, String>,
}

impl FilterValueSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The filter's provenance, e.g. `eu/prod` for `filters/eu/prod.filter`.
    pub fn source(&self) -> Option<&str> {
        self.get(FILTER_SOURCE_KEY)
    }
}

impl From<IndexMap<String, String>> for FilterValueSet {
    fn from(values: IndexMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterValueSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Provenance value of a filter: its relative directory plus its name, `/`-separated.
pub fn filter_source(filter: &CatalogEntry) -> String {
    normalize(&format!(
        "{}{}",
        filter.relative_sub_directory, filter.name_without_extension
    ))
}

/// Reads and parses a filter file, then sets `filter.source`.
///
/// The synthesized entry replaces any `filter.source` line in the file itself.
pub fn load_filter(filter: &CatalogEntry, encoding: TextEncoding) -> Result<FilterValueSet> {
    let path = &filter.absolute_path;
    debug!("Loading filter: {}", path.display());

    let content = encoding.read_to_string(path, |source| Error::FilterLoadError {
        path: path.clone(),
        source,
    })?;
    let mut values = parse_properties(&content).map_err(|e| Error::FilterParseError {
        path: path.clone(),
        line: e.line,
        message: e.message,
    })?;

    values.insert(FILTER_SOURCE_KEY.to_string(), filter_source(filter));
    Ok(FilterValueSet { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn entry(path: &Path, sub_directory: &str) -> CatalogEntry {
        CatalogEntry {
            absolute_path: path.to_path_buf(),
            file_name: path.file_name().unwrap().to_string_lossy().into_owned(),
            name_without_extension: path.file_stem().unwrap().to_string_lossy().into_owned(),
            relative_sub_directory: sub_directory.to_string(),
            is_deploy_root: false,
        }
    }

    #[test]
    fn test_load_filter_adds_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("env-a.filter");
        fs::write(&path, "host=a.example.com\nfilter.source=spoofed\n").unwrap();

        let values = load_filter(&entry(&path, ""), TextEncoding::default()).unwrap();
        assert_eq!(values.get("host"), Some("a.example.com"));
        assert_eq!(values.source(), Some("env-a"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_source_in_sub_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prod.filter");
        fs::write(&path, "").unwrap();

        let values = load_filter(&entry(&path, "eu/"), TextEncoding::default()).unwrap();
        assert_eq!(values.source(), Some("eu/prod"));
    }

    #[test]
    fn test_load_filter_with_latin1() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.filter");
        fs::write(&path, b"greeting=caf\xE9\n").unwrap();

        let encoding = TextEncoding::for_label("ISO-8859-1").unwrap();
        let values = load_filter(&entry(&path, ""), encoding).unwrap();
        assert_eq!(values.get("greeting"), Some("café"));
    }

    #[test]
    fn test_load_filter_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.filter");
        assert!(matches!(
            load_filter(&entry(&missing, ""), TextEncoding::default()),
            Err(Error::FilterLoadError { .. })
        ));

        let broken = temp_dir.path().join("broken.filter");
        fs::write(&broken, "key=\\uZZZZ\n").unwrap();
        assert!(matches!(
            load_filter(&entry(&broken, ""), TextEncoding::default()),
            Err(Error::FilterParseError { line: 1, .. })
        ));
    }
}
