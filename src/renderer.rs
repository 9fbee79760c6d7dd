//! Template rendering for confgen.
//! Substitutes `${key}` placeholders with filter values and writes the result
//! to its planned location.

use std::fs;

use log::{debug, warn};
use regex::{Captures, Regex};

use crate::catalog::CatalogEntry;
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::filter::FilterValueSet;
use crate::planner::OutputPlan;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template text against one filter's values.
    fn render(&self, template: &str, values: &FilterValueSet) -> Result<String>;
}

/// Flat `${key}` substitution.
///
/// - values are themselves substituted, so `${a}` may expand to text using `${b}`
/// - `$${key}` is an escape for the literal `${key}`
/// - unknown keys and self-referencing chains are left as written
pub struct PlaceholderRenderer {
    placeholder: Regex,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        // The optional leading `$` marks an escaped placeholder.
        let placeholder = Regex::new(r"(\$?)\$\{([^{}]*)\}").expect("placeholder pattern is valid");
        Self { placeholder }
    }

    fn substitute(&self, text: &str, values: &FilterValueSet, resolving: &mut Vec<String>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.placeholder.captures_iter(text) {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            out.push_str(&text[last..whole.start]);
            out.push_str(&self.replacement(&caps, values, resolving));
            last = whole.end;
        }
        out.push_str(&text[last..]);
        out
    }

    fn replacement(
        &self,
        caps: &Captures<'_>,
        values: &FilterValueSet,
        resolving: &mut Vec<String>,
    ) -> String {
        let key = &caps[2];
        let verbatim = format!("${{{key}}}");
        if !caps[1].is_empty() {
            return verbatim;
        }
        let Some(value) = values.get(key) else {
            debug!("No value for placeholder '{key}'");
            return verbatim;
        };
        if resolving.iter().any(|k| k == key) {
            warn!("Cyclic placeholder '{key}' via {}", resolving.join(" -> "));
            return verbatim;
        }
        resolving.push(key.to_string());
        let resolved = self.substitute(value, values, resolving);
        resolving.pop();
        resolved
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        PlaceholderRenderer::new()
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, values: &FilterValueSet) -> Result<String> {
        Ok(self.substitute(template, values, &mut Vec::new()))
    }
}

/// Reads `template`, renders it and writes the result to `plan`, replacing any
/// existing file. Returns the rendered text.
pub fn render_template(
    renderer: &dyn TemplateRenderer,
    template: &CatalogEntry,
    values: &FilterValueSet,
    plan: &OutputPlan,
    encoding: TextEncoding,
) -> Result<String> {
    let source = &template.absolute_path;
    let raw = encoding.read_to_string(source, |e| Error::TemplateReadError {
        path: source.clone(),
        source: e,
    })?;

    let rendered = renderer.render(&raw, values)?;

    let target = plan.path();
    let bytes = encoding.encode_for(&target, &rendered)?;
    fs::write(&target, bytes).map_err(|e| Error::TemplateWriteError {
        path: target.clone(),
        source: e,
    })?;
    Ok(rendered)
}
