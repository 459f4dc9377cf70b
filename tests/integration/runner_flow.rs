//! End-to-end runner tests: file templates, real process execution, round-tripped state.

use super::test_utils::Workspace;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use xrender::config::XConfig;
use xrender::error::ExecutorError;
use xrender::executor::ShellCommandRunner;
use xrender::message::Message;
use xrender::renderer::RendererRegistry;
use xrender::runner::{RunRequest, Runner};
use xrender::state::Container;
use xrender::template::FileTemplateSource;

fn runner(ws: &Workspace) -> Runner {
    let mut config = XConfig::default();
    config.templates.sources = vec!["templates.yaml".to_string()];
    config.runner.timeout_secs = 10;
    let registry = Arc::new(RendererRegistry::with_defaults(&config.runner).unwrap());
    Runner::new(
        &config,
        registry,
        Arc::new(FileTemplateSource::with_base_dir(ws.root())),
        Arc::new(ShellCommandRunner::new()),
    )
}

async fn run(runner: &Runner, request: RunRequest) -> Result<Message, ExecutorError> {
    runner.run(&request, &CancellationToken::new()).await
}

/// State payload the chat platform posts back after `value` was picked in `field`.
fn picked(block: &str, field: &str, value: &str) -> Container {
    let payload = serde_json::json!({
        block: { field: { "selected_option": { "value": value } } }
    });
    Container::from_json(&payload.to_string()).unwrap()
}

fn button_commands(msg: &Message) -> Vec<String> {
    msg.sections
        .iter()
        .flat_map(|s| s.buttons.iter().map(|b| b.command.clone()))
        .collect()
}

#[tokio::test]
async fn test_first_render_selects_first_row() {
    let ws = Workspace::new();
    let runner = runner(&ws);
    let msg = run(&runner, RunRequest::new(ws.pods_invocation())).await.unwrap();

    assert_eq!(msg.sections.len(), 3);
    assert!(msg.only_visible_for_you);
    assert!(!msg.replace_original);

    let dropdowns = &msg.sections[0].selects;
    assert!(dropdowns.id.is_empty());
    assert_eq!(dropdowns.items.len(), 2);
    let pods = &dropdowns.items[0];
    assert_eq!(pods.command, format!("{{{{BotName}}}} {}", ws.pods_invocation()));
    let names: Vec<&str> = pods.option_groups[0]
        .options
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["nginx-7c5ddbdf54-2xkqv", "grafana-5f8c9b6d4-9wq2z", "redis-0"]
    );
    assert_eq!(pods.initial_option.as_ref().unwrap().value, "@idx:0");
    assert_eq!(
        dropdowns.items[1].option_groups[0].options[2].name,
        "redis-0 (Pending)"
    );

    assert_eq!(
        msg.sections[1].base.body.code_block,
        "nginx-7c5ddbdf54-2xkqv is Running after 0 restart(s)"
    );

    let actions = &msg.sections[2].selects.items[0];
    assert_eq!(actions.name, "Actions");
    assert_eq!(actions.command, "{{BotName}} x run");
    let values: Vec<&str> = actions.option_groups[0]
        .options
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(
        values,
        vec![
            "kubectl describe pod nginx-7c5ddbdf54-2xkqv",
            "kubectl logs nginx-7c5ddbdf54-2xkqv",
        ]
    );
    assert_eq!(
        button_commands(&msg),
        vec![format!("{{{{BotName}}}} {} @raw", ws.pods_invocation())]
    );
}

#[tokio::test]
async fn test_selection_round_trip_updates_every_dropdown() {
    let ws = Workspace::new();
    let runner = runner(&ws);
    let first = run(&runner, RunRequest::new(ws.pods_invocation())).await.unwrap();

    // The user picks the third row in the first dropdown.
    let pods = &first.sections[0].selects.items[0];
    let option = &pods.option_groups[0].options[2];
    let state = picked("block-42", &pods.command, &option.value);

    let second = run(
        &runner,
        RunRequest::new(format!("{} {}", ws.pods_invocation(), option.value)).with_state(state),
    )
    .await
    .unwrap();

    assert!(second.replace_original);
    assert_eq!(second.sections[0].selects.id, "block-42");
    for select in &second.sections[0].selects.items {
        assert_eq!(select.initial_option.as_ref().unwrap().value, "@idx:2");
        // The follow-up command never accumulates directives.
        assert_eq!(select.command, pods.command);
    }
    assert_eq!(
        second.sections[1].base.body.code_block,
        "redis-0 is Pending after 0 restart(s)"
    );
    assert_eq!(
        second.sections[2].selects.items[0].option_groups[0].options[1].value,
        "kubectl logs redis-0"
    );
}

#[tokio::test]
async fn test_stale_selection_is_clamped() {
    let ws = Workspace::new();
    let runner = runner(&ws);
    let field = format!("{{{{BotName}}}} {}", ws.pods_invocation());
    let msg = run(
        &runner,
        RunRequest::new(ws.pods_invocation()).with_state(picked("b", &field, "@idx:99")),
    )
    .await
    .unwrap();

    let initial = msg.sections[0].selects.items[0].initial_option.as_ref().unwrap();
    assert_eq!(initial.value, "@idx:2");
    assert_eq!(initial.name, "redis-0");
}

#[tokio::test]
async fn test_raw_button_returns_output_verbatim() {
    let ws = Workspace::new();
    let runner = runner(&ws);
    let msg = run(&runner, RunRequest::new(format!("{} @raw", ws.pods_invocation())))
        .await
        .unwrap();

    assert_eq!(msg.sections.len(), 1);
    assert_eq!(msg.sections[0].base.body.code_block, super::test_utils::PODS_OUTPUT);
    assert!(msg.is_static());
}

#[tokio::test]
async fn test_tutorial_pages() {
    let ws = Workspace::new();
    let runner = runner(&ws);

    let first = run(&runner, RunRequest::new("x run echo quickstart")).await.unwrap();
    assert!(!first.replace_original);
    assert_eq!(first.sections[0].base.header, "Pick a step");
    assert_eq!(
        button_commands(&first),
        vec![
            "{{BotName}} x run kubectl get pods",
            "{{BotName}} x run kubectl get svc",
            "{{BotName}} x run echo quickstart @page:1",
        ]
    );

    let second = run(&runner, RunRequest::new("x run echo quickstart @page:1"))
        .await
        .unwrap();
    assert!(second.replace_original);
    assert_eq!(
        button_commands(&second),
        vec![
            "{{BotName}} x run helm list",
            "{{BotName}} x run echo quickstart @page:0",
        ]
    );
}

#[tokio::test]
async fn test_tutorial_page_past_the_end() {
    let ws = Workspace::new();
    let msg = run(&runner(&ws), RunRequest::new("x run echo quickstart @page:5"))
        .await
        .unwrap();
    assert_eq!(
        button_commands(&msg),
        vec!["{{BotName}} x run echo quickstart @page:1"]
    );
}

#[tokio::test]
async fn test_wrapper_and_raw_fallback() {
    let ws = Workspace::new();
    let runner = runner(&ws);

    let wrapped = run(&runner, RunRequest::new("x run echo hello")).await.unwrap();
    assert_eq!(wrapped.sections[0].base.body.code_block, "hello\n");
    assert_eq!(button_commands(&wrapped), vec!["{{BotName}} x run echo again"]);

    let unmatched = run(&runner, RunRequest::new("x run printf abc")).await.unwrap();
    assert_eq!(unmatched.sections.len(), 1);
    assert_eq!(unmatched.sections[0].base.body.code_block, "abc");
}

#[tokio::test]
async fn test_failing_command_is_reported() {
    let ws = Workspace::new();
    let err = run(&runner(&ws), RunRequest::new("x run false")).await.unwrap_err();
    match err {
        ExecutorError::CommandExecution { command, .. } => assert_eq!(command, "false"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_template_file_fails_before_execution() {
    let ws = Workspace::new();
    std::fs::remove_file(ws.root().join("templates.yaml")).unwrap();
    let err = run(&runner(&ws), RunRequest::new("x run echo hi")).await.unwrap_err();
    assert!(matches!(err, ExecutorError::TemplateLoad(_)));
}
