//! Output location for each (template, filter) pair.
//!
//! Outputs are laid out as
//! `<output>/<filter dir><filter name>/<template dir><template file>`, except that
//! templates in the deploy directory skip the template dir so they sit next to
//! the sub-trees they call into.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::catalog::CatalogEntry;
use crate::error::{Error, Result};
use crate::paths::join_segments;

/// Where one generated file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub directory: PathBuf,
    pub file_name: String,
}

impl OutputPlan {
    /// Full path of the generated file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Computes the output location without touching the file system.
pub fn plan_output<P: AsRef<Path>>(
    template: &CatalogEntry,
    filter: &CatalogEntry,
    output_root: P,
) -> OutputPlan {
    let template_dir = if template.is_deploy_root {
        ""
    } else {
        template.relative_sub_directory.as_str()
    };
    let directory = join_segments(
        output_root,
        &[
            filter.relative_sub_directory.as_str(),
            filter.name_without_extension.as_str(),
            template_dir,
        ],
    );
    OutputPlan {
        directory,
        file_name: template.file_name.clone(),
    }
}

/// Computes the output location and makes sure its directory exists.
///
/// Creation is idempotent: directories that already exist, including ones
/// created concurrently, are left alone.
pub fn prepare_output<P: AsRef<Path>>(
    template: &CatalogEntry,
    filter: &CatalogEntry,
    output_root: P,
) -> Result<OutputPlan> {
    let plan = plan_output(template, filter, output_root);
    if !plan.directory.is_dir() {
        debug!("Create: {}", plan.directory.display());
        fs::create_dir_all(&plan.directory).map_err(|source| Error::OutputDirectoryError {
            path: plan.directory.clone(),
            source,
        })?;
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(sub_directory: &str, file_name: &str, is_deploy_root: bool) -> CatalogEntry {
        let stem = Path::new(file_name).file_stem().unwrap().to_string_lossy().into_owned();
        CatalogEntry {
            absolute_path: PathBuf::from("/in").join(sub_directory).join(file_name),
            file_name: file_name.to_string(),
            name_without_extension: stem,
            relative_sub_directory: sub_directory.to_string(),
            is_deploy_root,
        }
    }

    #[test]
    fn test_plan_nested_template() {
        let template = entry("jboss/", "do_something.cli", false);
        let filter = entry("", "env-a.filter", false);

        let plan = plan_output(&template, &filter, "/out");
        assert_eq!(plan.directory, Path::new("/out").join("env-a").join("jboss"));
        assert_eq!(plan.file_name, "do_something.cli");
        assert_eq!(plan.path(), Path::new("/out/env-a/jboss/do_something.cli"));
    }

    #[test]
    fn test_plan_deploy_template() {
        let template = entry("deploy/", "run.sh", true);
        let filter = entry("", "env-b.filter", false);

        let plan = plan_output(&template, &filter, "/out");
        assert_eq!(plan.path(), Path::new("/out/env-b/run.sh"));
    }

    #[test]
    fn test_plan_filter_in_sub_directory() {
        let template = entry("", "app.properties", false);
        let filter = entry("eu/", "prod.filter", false);

        let plan = plan_output(&template, &filter, "/out/");
        assert_eq!(plan.path(), Path::new("/out/eu/prod/app.properties"));
    }

    #[test]
    fn test_prepare_output_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let template = entry("a/b/", "x.txt", false);
        let filter = entry("", "env.filter", false);

        let plan = prepare_output(&template, &filter, temp_dir.path()).unwrap();
        assert!(plan.directory.is_dir());
        // Second call with the directory already present is fine.
        assert_eq!(prepare_output(&template, &filter, temp_dir.path()).unwrap(), plan);
    }

    #[test]
    fn test_prepare_output_collides_with_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("env"), "not a directory").unwrap();
        let template = entry("", "x.txt", false);
        let filter = entry("", "env.filter", false);

        match prepare_output(&template, &filter, temp_dir.path()) {
            Err(Error::OutputDirectoryError { path, .. }) => {
                assert_eq!(path, temp_dir.path().join("env"))
            }
            other => panic!("Expected OutputDirectoryError, got {other:?}"),
        }
    }
}
