//! ANSI escape handling for captured command output.

use once_cell::sync::Lazy;
use regex::Regex;

/// CSI sequences (colors, cursor movement), OSC sequences (titles, links)
/// terminated by BEL or ST, and two-byte escapes.
static ANSI_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]").unwrap()
});

/// Remove ANSI escape sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    ANSI_SEQUENCE.replace_all(text, "").into_owned()
}
