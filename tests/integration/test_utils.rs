//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PODS_OUTPUT: &str = "\
NAME                     READY   STATUS    RESTARTS   AGE
nginx-7c5ddbdf54-2xkqv   1/1     Running   0          2d
grafana-5f8c9b6d4-9wq2z  1/1     Running   3          5d
redis-0                  0/1     Pending   0          10m
";

pub const TEMPLATES: &str = r#"
templates:
  - trigger:
      command: "cat"
    type: "parser:table:space"
    message:
      selects:
        - name: "Pod"
          keyTpl: "{{ .name }}"
        - name: "Status"
          keyTpl: "{{name}} ({{status}})"
      actions:
        logs: "kubectl logs {{name}}"
        describe: "kubectl describe pod {{name}}"
      preview: "{{name}} is {{status}} after {{restarts}} restart(s)"
  - trigger:
      command: "echo quickstart"
    type: "tutorial"
    message:
      header: "Pick a step"
      paginate:
        page: 2
      buttons:
        - name: "Pods"
          command: "x run kubectl get pods"
        - name: "Services"
          command: "x run kubectl get svc"
        - name: "Releases"
          command: "x run helm list"
  - trigger:
      command: "echo"
    type: "wrapper"
    message:
      buttons:
        - name: "Again"
          command: "x run echo again"
"#;

/// Temporary workspace holding a template file and a captured command output.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("templates.yaml"), TEMPLATES).unwrap();
        std::fs::write(dir.path().join("pods.txt"), PODS_OUTPUT).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn pods_file(&self) -> PathBuf {
        self.dir.path().join("pods.txt")
    }

    /// Invocation that prints the captured pods table through `cat`.
    pub fn pods_invocation(&self) -> String {
        format!("x run cat {}", self.pods_file().display())
    }
}
