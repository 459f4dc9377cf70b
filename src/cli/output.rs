//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ExecutorError;

/// Map domain errors to a one-line string for CLI output.
pub fn map_error(e: &ExecutorError) -> String {
    match e {
        ExecutorError::Timeout(_) => format!("{} (see runner.timeout_secs)", e),
        other => other.to_string(),
    }
}

/// Process exit code for an error.
pub fn exit_code(e: &ExecutorError) -> i32 {
    match e {
        ExecutorError::Config(_) => 2,
        ExecutorError::Timeout(_) | ExecutorError::Cancelled => 124,
        _ => 1,
    }
}
