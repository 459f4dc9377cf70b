//! Renderer registry dispatch through the public API.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use xrender::command::Command;
use xrender::config::XConfig;
use xrender::error::ExecutorError;
use xrender::executor::CommandRunner;
use xrender::message::Message;
use xrender::renderer::{Renderer, RendererRegistry};
use xrender::runner::{RunRequest, Runner};
use xrender::state::Container;
use xrender::template::{parse_templates, Template, TemplateSource};

/// Renders the number of JSON keys in the output.
struct KeyCounter;

impl Renderer for KeyCounter {
    fn render_message(
        &self,
        _cmd: &Command,
        output: &str,
        _state: &Container,
        template: &Template,
    ) -> Result<Message, ExecutorError> {
        let value: serde_json::Value = serde_json::from_str(output)?;
        let keys = value.as_object().map(|o| o.len()).unwrap_or(0);
        let label = template
            .message
            .get("label")
            .and_then(|v| v.as_str())
            .unwrap_or("keys");
        Ok(Message::plaintext(format!("{}: {}", label, keys)))
    }
}

struct Templates(Vec<Template>);

#[async_trait]
impl TemplateSource for Templates {
    async fn load(&self, _refs: &[String]) -> Result<Vec<Template>, ExecutorError> {
        Ok(self.0.clone())
    }
}

struct Canned(&'static str);

#[async_trait]
impl CommandRunner for Canned {
    async fn execute(
        &self,
        _command: &str,
        _env: &BTreeMap<String, String>,
    ) -> Result<String, ExecutorError> {
        Ok(self.0.to_string())
    }
}

const TEMPLATES: &str = r#"
templates:
  - trigger:
      command: "kubectl get pod -o json"
    type: "parser:json:object"
    message:
      label: "fields"
  - trigger:
      command: "kubectl get"
    type: "parser:yaml"
"#;

fn runner(registry: Arc<RendererRegistry>, output: &'static str) -> Runner {
    let templates = parse_templates(TEMPLATES).unwrap();
    Runner::new(
        &XConfig::default(),
        registry,
        Arc::new(Templates(templates)),
        Arc::new(Canned(output)),
    )
}

#[tokio::test]
async fn test_custom_renderer_matched_by_pattern_key() {
    let registry = Arc::new(RendererRegistry::with_defaults(&XConfig::default().runner).unwrap());
    registry.register("^parser:json", Arc::new(KeyCounter)).unwrap();

    let msg = runner(registry, r#"{"a": 1, "b": 2}"#)
        .run(
            &RunRequest::new("x run kubectl get pod -o json"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(msg.sections[0].base.body.plaintext, "fields: 2");
}

#[tokio::test]
async fn test_unregistered_type_lists_available_keys() {
    let registry = Arc::new(RendererRegistry::with_defaults(&XConfig::default().runner).unwrap());
    registry.register("^parser:json", Arc::new(KeyCounter)).unwrap();

    let err = runner(registry, "kind: Pod")
        .run(&RunRequest::new("x run kubectl get pods"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No renderer available for type \"parser:yaml\"; registered types: \
         [^parser:json, parser:table:.*, tutorial, wrapper]"
    );
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let registry = RendererRegistry::with_defaults(&XConfig::default().runner).unwrap();
    let err = registry.register("tutorial", Arc::new(KeyCounter)).unwrap_err();
    assert!(matches!(err, ExecutorError::RegistryConflict(key) if key == "tutorial"));
    assert_eq!(registry.keys().len(), 3);
}

#[test]
fn test_concurrent_lookups_during_registration() {
    let registry = Arc::new(RendererRegistry::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .register(&format!("custom:{}", i), Arc::new(KeyCounter))
                    .unwrap();
                for _ in 0..100 {
                    assert!(registry.get(&format!("custom:{}", i)).is_ok());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.keys().len(), 8);
}
