//! Table Parser
//!
//! Reconstructs headers and rows from fixed-width, whitespace-aligned CLI
//! output such as `kubectl get pods` or `helm list`. Column boundaries are
//! inferred once from the header line and re-applied to every data line, so
//! each row always has exactly as many cells as there are headers.
//!
//! Offsets are byte offsets; cells cut through a multi-byte character are
//! decoded lossily rather than panicking.

use serde::{Deserialize, Serialize};

/// Width a tab is expanded to before column scanning.
const TAB_WIDTH: &str = "  ";

/// Parsed headers and rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A parsed table together with the original, unsplit lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOutput {
    pub table: Table,
    /// Header line followed by every data line, verbatim.
    pub lines: Vec<String>,
}

impl TableOutput {
    /// The header line, if the input had any content.
    pub fn header_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }
}

/// Parse space-separated tabular text.
pub fn table_separated(input: &str) -> TableOutput {
    let normalized = input.replace('\t', TAB_WIDTH);
    let lines: Vec<String> = normalized
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    let Some(header_line) = lines.first() else {
        return TableOutput::default();
    };

    let boundaries = column_boundaries(header_line);
    let headers = split_by_boundaries(header_line, &boundaries);
    let rows = lines[1..]
        .iter()
        .map(|line| split_by_boundaries(line, &boundaries))
        .collect();

    TableOutput {
        table: Table { headers, rows },
        lines,
    }
}

/// End offsets of every header cell.
///
/// A boundary is the last blank of a run of at least two blanks that is
/// followed by content. The header length is always the final boundary.
fn column_boundaries(header: &str) -> Vec<usize> {
    let bytes = header.as_bytes();
    let mut boundaries = Vec::new();

    for i in 1..bytes.len().saturating_sub(1) {
        if bytes[i].is_ascii_whitespace()
            && !bytes[i + 1].is_ascii_whitespace()
            && bytes[i - 1].is_ascii_whitespace()
        {
            boundaries.push(i);
        }
    }
    boundaries.push(bytes.len());
    boundaries
}

fn split_by_boundaries(line: &str, boundaries: &[usize]) -> Vec<String> {
    let bytes = line.as_bytes();
    let last = boundaries.len().saturating_sub(1);
    let mut cells = Vec::with_capacity(boundaries.len());
    let mut start = 0;

    for (i, &boundary) in boundaries.iter().enumerate() {
        // The last column runs to the end of each line; values may outgrow the header.
        let end = if i == last {
            bytes.len()
        } else {
            boundary.min(bytes.len())
        };
        let cell = String::from_utf8_lossy(&bytes[start..end]);
        cells.push(cell.trim().to_string());
        start = end;
    }
    cells
}
