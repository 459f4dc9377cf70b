//! Integration tests for configuration loading and the CLI run context

use super::test_utils::Workspace;
use xrender::cli::{Commands, RunContext};
use xrender::config::{ConfigLoader, XConfig};
use xrender::error::ExecutorError;

fn write_config(ws: &Workspace, body: &str) -> std::path::PathBuf {
    let path = ws.root().join("xrender.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_explicit_config_drives_run_command() {
    let ws = Workspace::new();
    let config_path = write_config(
        &ws,
        r#"
[templates]
sources = ["templates.yaml"]

[runner]
timeout_secs = 10
"#,
    );

    let ctx = RunContext::new(ws.root().to_path_buf(), Some(config_path)).unwrap();
    let out = ctx
        .execute(&Commands::Run {
            command: vec!["cat".to_string(), ws.pods_file().display().to_string()],
            state: None,
            env: Vec::new(),
            format: "json".to_string(),
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["only_visible_for_you"], true);
    assert_eq!(
        value["sections"][0]["selects"]["items"][0]["initial_option"]["name"],
        "nginx-7c5ddbdf54-2xkqv"
    );
}

#[test]
fn test_run_command_reads_state_file() {
    let ws = Workspace::new();
    let config_path = write_config(&ws, "[templates]\nsources = [\"templates.yaml\"]\n");
    let field = format!("{{{{BotName}}}} {}", ws.pods_invocation());
    let state_path = ws.root().join("state.json");
    std::fs::write(
        &state_path,
        serde_json::json!({ "blk": { field: { "selected_option": { "value": "@idx:1" } } } })
            .to_string(),
    )
    .unwrap();

    let ctx = RunContext::new(ws.root().to_path_buf(), Some(config_path)).unwrap();
    let out = ctx
        .execute(&Commands::Run {
            command: ws
                .pods_invocation()
                .split_whitespace()
                .map(String::from)
                .collect(),
            state: Some(state_path),
            env: Vec::new(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(out.contains("* grafana-5f8c9b6d4-9wq2z -> @idx:1"));
    assert!(out.contains("grafana-5f8c9b6d4-9wq2z is Running after 3 restart(s)"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let ws = Workspace::new();
    let config_path = write_config(&ws, "[runner]\ntimeout_secs = 0\ndefault_page_size = 0\n");
    let err = RunContext::new(ws.root().to_path_buf(), Some(config_path))
        .err()
        .unwrap();
    match err {
        ExecutorError::Config(msg) => {
            assert!(msg.contains("timeout_secs"));
            assert!(msg.contains("default_page_size"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_workspace_environment_file_layers() {
    let ws = Workspace::new();
    let config_dir = ws.root().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[runner]\ninvocation_prefix = \"kb exec\"\ndefault_page_size = 4\n",
    )
    .unwrap();
    std::fs::write(
        config_dir.join("development.toml"),
        "[runner]\ndefault_page_size = 8\n",
    )
    .unwrap();

    let config: XConfig = ConfigLoader::load(ws.root()).unwrap();
    assert_eq!(config.runner.invocation_prefix, "kb exec");
    if std::env::var("XRENDER_ENV").is_err() {
        assert_eq!(config.runner.default_page_size, 8);
    }
}

#[test]
fn test_config_command_round_trips() {
    let ws = Workspace::new();
    let config_path = write_config(&ws, "[templates]\nsources = [\"templates.yaml\"]\n");
    let ctx = RunContext::new(ws.root().to_path_buf(), Some(config_path)).unwrap();
    let out = ctx.execute(&Commands::Config).unwrap();
    let parsed: XConfig = toml::from_str(&out).unwrap();
    assert_eq!(&parsed, ctx.config());
}
