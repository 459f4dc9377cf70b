//! Renderer registry: template type to rendering strategy.
//!
//! Populated once at startup and then only read, possibly from many
//! concurrent invocations. Keys are matched exactly first; on a miss every
//! key is tried as an (unanchored) regular expression, which lets a single
//! registration such as `parser:table:.*` serve a whole family of types.

use crate::config::RunnerConfig;
use crate::error::ExecutorError;
use crate::renderer::{
    HandlebarsEvaluator, Renderer, TableRenderer, TutorialRenderer, WrapperRenderer,
};
use crate::template::{Template, TemplateKind};
use parking_lot::RwLock;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub const TABLE_RENDERER_KEY: &str = "parser:table:.*";
pub const TUTORIAL_RENDERER_KEY: &str = "tutorial";
pub const WRAPPER_RENDERER_KEY: &str = "wrapper";

struct Entry {
    /// `None` when the key is not a valid regex; such keys only match exactly.
    pattern: Option<Regex>,
    renderer: Arc<dyn Renderer>,
}

/// Thread-safe map of renderer keys to renderers.
pub struct RendererRegistry {
    renderers: RwLock<BTreeMap<String, Entry>>,
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            renderers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registry with the table, tutorial and wrapper renderers installed.
    pub fn with_defaults(config: &RunnerConfig) -> Result<Self, ExecutorError> {
        let registry = Self::new();
        let evaluator = Arc::new(HandlebarsEvaluator::new());

        registry.register(
            TABLE_RENDERER_KEY,
            Arc::new(TableRenderer::new(evaluator, &config.invocation_prefix)),
        )?;
        registry.register(
            TUTORIAL_RENDERER_KEY,
            Arc::new(TutorialRenderer::new(config.default_page_size)),
        )?;
        registry.register(WRAPPER_RENDERER_KEY, Arc::new(WrapperRenderer::new()))?;
        Ok(registry)
    }

    /// Register a renderer under `key`. Duplicate keys are rejected.
    pub fn register(&self, key: &str, renderer: Arc<dyn Renderer>) -> Result<(), ExecutorError> {
        let mut renderers = self.renderers.write();
        if renderers.contains_key(key) {
            return Err(ExecutorError::RegistryConflict(key.to_string()));
        }
        let pattern = Regex::new(key).ok();
        renderers.insert(key.to_string(), Entry { pattern, renderer });
        debug!(key, "Registered renderer");
        Ok(())
    }

    /// Look up the renderer for a template type: exact key, then pattern keys in key order.
    pub fn get(&self, template_type: &str) -> Result<Arc<dyn Renderer>, ExecutorError> {
        let renderers = self.renderers.read();
        if let Some(entry) = renderers.get(template_type) {
            return Ok(Arc::clone(&entry.renderer));
        }

        renderers
            .iter()
            .find(|(_, entry)| {
                entry
                    .pattern
                    .as_ref()
                    .map(|re| re.is_match(template_type))
                    .unwrap_or(false)
            })
            .map(|(key, entry)| {
                debug!(key = key.as_str(), template_type, "Renderer matched by pattern");
                Arc::clone(&entry.renderer)
            })
            .ok_or_else(|| ExecutorError::RenderDispatch {
                requested: template_type.to_string(),
                available: renderers.keys().cloned().collect(),
            })
    }

    /// Resolve the renderer for a template.
    ///
    /// An exact registration for the declared type wins; built-in kinds then go
    /// straight to their canonical key, and custom types fall back to pattern keys.
    pub fn resolve(&self, template: &Template) -> Result<Arc<dyn Renderer>, ExecutorError> {
        let canonical = builtin_key(&template.kind());
        if let Some(key) = canonical {
            let renderers = self.renderers.read();
            if !renderers.contains_key(&template.template_type) {
                if let Some(entry) = renderers.get(key) {
                    return Ok(Arc::clone(&entry.renderer));
                }
            }
        }
        self.get(&template.template_type)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.renderers.read().keys().cloned().collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_key(kind: &TemplateKind) -> Option<&'static str> {
    match kind {
        TemplateKind::Table(_) => Some(TABLE_RENDERER_KEY),
        TemplateKind::Tutorial => Some(TUTORIAL_RENDERER_KEY),
        TemplateKind::Wrapper => Some(WRAPPER_RENDERER_KEY),
        TemplateKind::Custom(_) => None,
    }
}
