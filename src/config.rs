//! Configuration handling for confgen.
//! Builds the [`GenerationConfig`] consumed by the processor from project defaults,
//! an optional project file (confgen.json, confgen.yml, confgen.yaml) and
//! command-line overrides.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILES, DEFAULT_DEPLOY_DIR, DEFAULT_ENCODING, DEFAULT_FILTERS_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_TEMPLATES_PATH,
};
use crate::error::{Error, Result};

/// Everything one generation run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Encoding label for reading templates and filters and writing outputs
    pub encoding: String,
    /// Template sub-directory whose outputs go straight into each filter's directory
    pub deploy_templates_directory: String,
    pub templates_base_path: PathBuf,
    pub filters_base_path: PathBuf,
    /// Deleted and regenerated on every run
    pub output_base_path: PathBuf,
    pub templates_to_ignore: Vec<String>,
    pub filters_to_ignore: Vec<String>,
    /// Log the rendered content of every generated file
    pub log_output: bool,
    /// Fail instead of warning when a scan root is missing
    pub strict: bool,
}

impl GenerationConfig {
    /// Default layout for a project rooted at `project_dir`.
    pub fn for_project<P: AsRef<Path>>(project_dir: P) -> Self {
        let project_dir = project_dir.as_ref();
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            deploy_templates_directory: DEFAULT_DEPLOY_DIR.to_string(),
            templates_base_path: project_dir.join(DEFAULT_TEMPLATES_PATH),
            filters_base_path: project_dir.join(DEFAULT_FILTERS_PATH),
            output_base_path: project_dir.join(DEFAULT_OUTPUT_PATH),
            templates_to_ignore: Vec::new(),
            filters_to_ignore: Vec::new(),
            log_output: false,
            strict: false,
        }
    }

    /// Layers the values set in `file` over this configuration.
    ///
    /// Relative paths in the file are taken relative to `project_dir`.
    pub fn merge_file<P: AsRef<Path>>(mut self, file: ConfigFile, project_dir: P) -> Self {
        let project_dir = project_dir.as_ref();
        let resolve = |path: PathBuf| project_dir.join(path);

        if let Some(encoding) = file.encoding {
            self.encoding = encoding;
        }
        if let Some(deploy) = file.deploy_templates_directory {
            self.deploy_templates_directory = deploy;
        }
        if let Some(path) = file.templates_base_path {
            self.templates_base_path = resolve(path);
        }
        if let Some(path) = file.filters_base_path {
            self.filters_base_path = resolve(path);
        }
        if let Some(path) = file.output_base_path {
            self.output_base_path = resolve(path);
        }
        if let Some(ignored) = file.templates_to_ignore {
            self.templates_to_ignore = resolve_all(project_dir, ignored);
        }
        if let Some(ignored) = file.filters_to_ignore {
            self.filters_to_ignore = resolve_all(project_dir, ignored);
        }
        if let Some(log_output) = file.log_output {
            self.log_output = log_output;
        }
        if let Some(strict) = file.strict {
            self.strict = strict;
        }
        self
    }
}

fn resolve_all(project_dir: &Path, entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| {
            let trimmed = entry.trim();
            if trimmed.is_empty() || Path::new(trimmed).is_absolute() {
                entry
            } else {
                project_dir.join(trimmed).display().to_string()
            }
        })
        .collect()
}

/// Contents of a project configuration file. Every field is optional.
///
/// Keys may be written in snake_case or camelCase:
///
/// ```yaml
/// encoding: ISO-8859-1
/// deployTemplatesDirectory: scripts
/// filtersToIgnore:
///   - src/config/filters/personal
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub encoding: Option<String>,
    #[serde(alias = "deployTemplatesDirectory")]
    pub deploy_templates_directory: Option<String>,
    #[serde(alias = "templatesBasePath")]
    pub templates_base_path: Option<PathBuf>,
    #[serde(alias = "filtersBasePath")]
    pub filters_base_path: Option<PathBuf>,
    #[serde(alias = "outputBasePath")]
    pub output_base_path: Option<PathBuf>,
    #[serde(alias = "templatesToIgnore")]
    pub templates_to_ignore: Option<Vec<String>>,
    #[serde(alias = "filtersToIgnore")]
    pub filters_to_ignore: Option<Vec<String>>,
    #[serde(alias = "logOutput")]
    pub log_output: Option<bool>,
    pub strict: Option<bool>,
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config_file(content: &str) -> Result<ConfigFile> {
    match serde_json::from_str(content) {
        Ok(file) => Ok(file),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the first configuration file found in `project_dir`, if any.
///
/// # Errors
/// * `Error::IoError` if the file exists but cannot be read
/// * `Error::ConfigError` if it cannot be parsed
pub fn load_config_file<P: AsRef<Path>>(project_dir: P) -> Result<Option<ConfigFile>> {
    for file in CONFIG_FILES {
        let config_path = project_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return parse_config_file(&content).map(Some);
        }
    }
    debug!("No configuration file found (tried: {})", CONFIG_FILES.join(", "));
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_defaults() {
        let config = GenerationConfig::for_project("/project");
        assert_eq!(config.encoding, "UTF-8");
        assert_eq!(config.deploy_templates_directory, "deploy");
        assert_eq!(
            config.templates_base_path,
            Path::new("/project/src/config/templates")
        );
        assert_eq!(config.filters_base_path, Path::new("/project/src/config/filters"));
        assert_eq!(
            config.output_base_path,
            Path::new("/project/target/generated-config")
        );
        assert!(config.templates_to_ignore.is_empty());
        assert!(!config.log_output);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = parse_config_file("encoding: ISO-8859-1\ndeployTemplatesDirectory: scripts\n").unwrap();
        assert_eq!(yaml.encoding.as_deref(), Some("ISO-8859-1"));
        assert_eq!(yaml.deploy_templates_directory.as_deref(), Some("scripts"));

        let json = parse_config_file(r#"{"output_base_path": "out", "log_output": true}"#).unwrap();
        assert_eq!(json.output_base_path, Some(PathBuf::from("out")));
        assert_eq!(json.log_output, Some(true));

        assert!(matches!(
            parse_config_file("unknown_key: 1\n"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_merge_file_resolves_relative_paths() {
        let file = ConfigFile {
            output_base_path: Some(PathBuf::from("build/config")),
            filters_to_ignore: Some(vec![
                "src/config/filters/personal".to_string(),
                "/abs/ignored".to_string(),
            ]),
            ..Default::default()
        };
        let config = GenerationConfig::for_project("/project").merge_file(file, "/project");
        assert_eq!(config.output_base_path, Path::new("/project/build/config"));
        assert_eq!(
            config.filters_to_ignore,
            vec![
                Path::new("/project")
                    .join("src/config/filters/personal")
                    .display()
                    .to_string(),
                "/abs/ignored".to_string(),
            ]
        );
        assert_eq!(config.encoding, "UTF-8");
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_config_file(temp_dir.path()).unwrap().is_none());

        std::fs::write(temp_dir.path().join("confgen.yml"), "strict: true\n").unwrap();
        let file = load_config_file(temp_dir.path()).unwrap().unwrap();
        assert_eq!(file.strict, Some(true));
    }
}
