//! Integration tests for the xrender rendering pipeline

mod config_integration;
mod registry_dispatch;
mod runner_flow;
mod test_utils;
