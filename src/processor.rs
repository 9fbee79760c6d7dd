//! Core generation orchestration.
//! Clears the output tree, catalogs filters and templates and renders every
//! (filter, template) pair, filters in the outer loop.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::catalog::{CatalogEntry, PathCatalog};
use crate::config::GenerationConfig;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::filter::load_filter;
use crate::planner::{plan_output, prepare_output};
use crate::renderer::{render_template, PlaceholderRenderer, TemplateRenderer};

/// Progress of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    CleaningOutput,
    ScanningFilters,
    ScanningTemplates,
    Generating,
    Done,
    /// A step failed and the rest of the run was abandoned.
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::CleaningOutput => "cleaning output",
            Stage::ScanningFilters => "scanning filters",
            Stage::ScanningTemplates => "scanning templates",
            Stage::Generating => "generating",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a completed run produced.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub filters: Vec<CatalogEntry>,
    pub templates: Vec<CatalogEntry>,
    /// Written files in generation order.
    pub generated: Vec<PathBuf>,
}

/// Drives one generation run.
pub struct Processor<'a> {
    config: &'a GenerationConfig,
    renderer: &'a dyn TemplateRenderer,
    stage: Stage,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a GenerationConfig, renderer: &'a dyn TemplateRenderer) -> Self {
        Self {
            config,
            renderer,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    /// Runs every step, stopping at the first error.
    ///
    /// # Flow
    /// 1. Resolves the encoding (before anything on disk changes)
    /// 2. Deletes the output directory
    /// 3. Scans filters, then templates
    /// 4. For each filter, for each template: plans, creates and writes the output
    pub fn run(&mut self) -> Result<GenerationReport> {
        match self.execute() {
            Ok(report) => {
                self.enter(Stage::Done);
                Ok(report)
            }
            Err(e) => {
                self.enter(Stage::Failed);
                Err(e)
            }
        }
    }

    fn execute(&mut self) -> Result<GenerationReport> {
        let config = self.config;
        let encoding = TextEncoding::for_label(&config.encoding)?;

        self.enter(Stage::CleaningOutput);
        clean_output(&config.output_base_path)?;

        self.enter(Stage::ScanningFilters);
        info!("Scanning filters directory: {}", config.filters_base_path.display());
        let filters = scan(
            PathCatalog::new(&config.filters_to_ignore),
            &config.filters_base_path,
            config.strict,
        )?;

        self.enter(Stage::ScanningTemplates);
        info!("Scanning templates directory: {}", config.templates_base_path.display());
        let templates = scan(
            PathCatalog::new(&config.templates_to_ignore)
                .with_deploy_dir(&config.deploy_templates_directory),
            &config.templates_base_path,
            config.strict,
        )?;

        self.enter(Stage::Generating);
        check_collisions(&filters, &templates, &config.output_base_path)?;
        info!("Generating: {}", config.output_base_path.display());
        let mut generated = Vec::with_capacity(filters.len() * templates.len());
        for filter in &filters {
            let values = load_filter(filter, encoding)?;
            for template in &templates {
                let plan = prepare_output(template, filter, &config.output_base_path)?;
                let target = plan.path();
                info!("Generating: {}", target.display());
                debug!("Applying filter {filter:?} to template {template:?}");
                let content = render_template(self.renderer, template, &values, &plan, encoding)?;
                if config.log_output {
                    info!("{}:\n{}", target.display(), content);
                }
                generated.push(target);
            }
        }

        Ok(GenerationReport {
            filters,
            templates,
            generated,
        })
    }
}

fn describe_pair(filter: &CatalogEntry, template: &CatalogEntry) -> String {
    format!(
        "filter '{}' with template '{}'",
        filter.relative_path(),
        template.relative_path()
    )
}

/// Fails if two (filter, template) pairs plan the same output file.
///
/// Runs before anything is written, so a colliding layout leaves no output behind.
pub fn check_collisions(
    filters: &[CatalogEntry],
    templates: &[CatalogEntry],
    output: &Path,
) -> Result<()> {
    let mut planned: HashMap<PathBuf, (&CatalogEntry, &CatalogEntry)> = HashMap::new();
    for filter in filters {
        for template in templates {
            let path = plan_output(template, filter, output).path();
            if let Some((first_filter, first_template)) = planned.get(&path) {
                return Err(Error::OutputCollision {
                    path,
                    first: describe_pair(first_filter, first_template),
                    second: describe_pair(filter, template),
                });
            }
            planned.insert(path, (filter, template));
        }
    }
    Ok(())
}

fn scan(catalog: PathCatalog, root: &Path, strict: bool) -> Result<Vec<CatalogEntry>> {
    if strict {
        catalog.scan_strict(root)
    } else {
        catalog.scan(root)
    }
}

/// Removes the output directory and everything below it, if present.
pub fn clean_output(output: &Path) -> Result<()> {
    debug!("Deleting output directory {}", output.display());
    let removed = if output.is_dir() {
        fs::remove_dir_all(output)
    } else if output.exists() {
        fs::remove_file(output)
    } else {
        return Ok(());
    };
    removed.map_err(|source| Error::CleanOutputError {
        path: output.to_path_buf(),
        source,
    })
}

/// Runs a full generation with the built-in `${key}` renderer.
pub fn generate(config: &GenerationConfig) -> Result<GenerationReport> {
    let renderer = PlaceholderRenderer::new();
    Processor::new(config, &renderer).run()
}
