//! Directive parsing
//!
//! Users steer rendering with in-band tokens typed straight into the command:
//! `@raw` asks for the unprocessed output, `@idx:N` selects a table row and
//! `@page:N` flips a paginated menu. The parser strips them so the remaining
//! text can be executed as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static RAW_INDICATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"@raw").unwrap());
static INDEX_INDICATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"@idx:(\d+)").unwrap());
static PAGE_INDICATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"@page:(\d+)").unwrap());

/// Directive appended to a command to request raw output.
pub const RAW_DIRECTIVE: &str = "@raw";

/// A user command with its control tokens removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    /// Command text without any directive.
    pub to_execute: String,
    /// `@raw` was present.
    pub is_raw_required: bool,
    /// Value of the first `@page:N`, zero when absent or unparsable.
    pub page_index: usize,
}

impl Command {
    /// The command with `prefix` (e.g. `x run`) removed from its front.
    ///
    /// Returns the full text when the prefix is absent.
    pub fn executable(&self, prefix: &str) -> &str {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return &self.to_execute;
        }
        match self.to_execute.strip_prefix(prefix) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
            _ => &self.to_execute,
        }
    }
}

/// Parse raw user input into a [`Command`].
///
/// Removing a token can splice its neighbours into a new token
/// (`@r@rawaw`), so removal repeats until the text is stable. Only the
/// first pass is consulted for the page index.
pub fn parse(raw: &str) -> Command {
    let mut text = raw.trim().to_string();
    let page_index = first_capture(&PAGE_INDICATOR, &text).unwrap_or(0);
    let mut is_raw_required = false;

    loop {
        if RAW_INDICATOR.is_match(&text) {
            is_raw_required = true;
        }
        let stripped = strip_directives(&text);
        if stripped == text {
            break;
        }
        text = stripped;
    }

    Command {
        to_execute: text,
        is_raw_required,
        page_index,
    }
}

/// Row index carried by an `@idx:N` token anywhere in `value`.
pub fn parse_index(value: &str) -> Option<usize> {
    first_capture(&INDEX_INDICATOR, value)
}

/// Option value that selects row `idx` when sent back by the chat layer.
pub fn index_directive(idx: usize) -> String {
    format!("@idx:{}", idx)
}

/// Directive that opens page `page` of a paginated message.
pub fn page_directive(page: usize) -> String {
    format!("@page:{}", page)
}

fn strip_directives(text: &str) -> String {
    let text = RAW_INDICATOR.replace_all(text, "");
    let text = INDEX_INDICATOR.replace_all(&text, "");
    let text = PAGE_INDICATOR.replace_all(&text, "");
    text.trim().to_string()
}

fn first_capture(re: &Regex, text: &str) -> Option<usize> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
