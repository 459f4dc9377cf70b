//! Template sources
//!
//! The runner obtains its template set through [`TemplateSource`]. The
//! default [`FileTemplateSource`] reads YAML template files from local paths;
//! fetching and caching remote definitions is left to other implementations.

use crate::error::ExecutorError;
use crate::template::{Template, TemplateFile};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Produces the ordered template set for one invocation.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn load(&self, refs: &[String]) -> Result<Vec<Template>, ExecutorError>;
}

/// Loads templates from files and directories.
///
/// Each reference is either a YAML file or a directory walked recursively for
/// `*.yaml`/`*.yml` files in file-name order. Templates keep their order
/// within a file and files keep the order of the references.
#[derive(Debug, Clone, Default)]
pub struct FileTemplateSource {
    base_dir: Option<PathBuf>,
}

impl FileTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative references against `base_dir` instead of the process cwd.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn collect_files(path: &Path) -> Result<Vec<PathBuf>, ExecutorError> {
        if !path.exists() {
            return Err(ExecutorError::TemplateLoad(format!(
                "Template source not found: {}",
                path.display()
            )));
        }
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| ExecutorError::TemplateLoad(e.to_string()))?;
            let is_yaml = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false);
            if entry.file_type().is_file() && is_yaml {
                files.push(entry.into_path());
            }
        }
        if files.is_empty() {
            warn!(dir = %path.display(), "Template directory contains no YAML files");
        }
        Ok(files)
    }
}

/// Parse one template file's contents.
pub fn parse_templates(contents: &str) -> Result<Vec<Template>, ExecutorError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: TemplateFile = serde_yaml::from_str(contents)?;
    Ok(file.templates)
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn load(&self, refs: &[String]) -> Result<Vec<Template>, ExecutorError> {
        let mut templates = Vec::new();

        for reference in refs {
            let path = self.resolve(reference);
            // Directory walks use blocking filesystem calls.
            let files = tokio::task::spawn_blocking(move || Self::collect_files(&path))
                .await
                .map_err(|e| ExecutorError::TemplateLoad(format!("Template scan failed: {}", e)))??;
            for file in files {
                let contents = tokio::fs::read_to_string(&file).await.map_err(|e| {
                    ExecutorError::TemplateLoad(format!("{}: {}", file.display(), e))
                })?;
                let parsed = parse_templates(&contents).map_err(|e| {
                    ExecutorError::TemplateLoad(format!("{}: {}", file.display(), e))
                })?;
                debug!(file = %file.display(), count = parsed.len(), "Loaded templates");
                templates.extend(parsed);
            }
        }
        Ok(templates)
    }
}
