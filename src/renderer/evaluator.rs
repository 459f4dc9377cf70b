//! Per-row expression evaluation.
//!
//! Key, preview and action templates are rendered against one table row at a
//! time. A row is exposed as a map from the lower-camel-cased header name to
//! the cell value, so `APP VERSION` is reachable as `appVersion`.

use crate::error::ExecutorError;
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Template variables for one row.
pub type RowData = BTreeMap<String, String>;

/// `{{ .name }}` field references, accepted as an alias of `{{ name }}`.
static DOTTED_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(~?\s*)\.([A-Za-z_])").unwrap());

/// Renders a template string against row data.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, template: &str, row: &RowData) -> Result<String, ExecutorError>;
}

/// Handlebars-backed evaluator: no HTML escaping, missing fields render empty.
pub struct HandlebarsEvaluator {
    engine: Handlebars<'static>,
}

impl HandlebarsEvaluator {
    pub fn new() -> Self {
        let mut engine = Handlebars::new();
        engine.register_escape_fn(handlebars::no_escape);
        engine.set_strict_mode(false);
        Self { engine }
    }
}

impl Default for HandlebarsEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for HandlebarsEvaluator {
    fn evaluate(&self, template: &str, row: &RowData) -> Result<String, ExecutorError> {
        let template = DOTTED_FIELD.replace_all(template, "{{${1}${2}");
        Ok(self.engine.render_template(&template, row)?)
    }
}

/// Pair each header (as a lower-camel key) with the row's cell.
pub fn row_data(headers: &[String], row: &[String]) -> RowData {
    headers
        .iter()
        .zip(row.iter())
        .map(|(header, cell)| (to_lower_camel(header), cell.clone()))
        .collect()
}

/// `APP VERSION` -> `appVersion`, `CLUSTER-IP` -> `clusterIp`, `NAME` -> `name`.
pub fn to_lower_camel(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let words = header
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty());

    for (i, word) in words.enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
