//! Property-based tests for the whitespace table parser

use proptest::prelude::*;
use xrender::table::table_separated;

/// Aligned table text: every column padded to the widest cell plus a gap.
fn aligned_table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>, String)> {
    (1usize..6, 0usize..8).prop_flat_map(|(cols, rows)| {
        let cell = "[A-Za-z0-9/.:-]{1,10}";
        (
            prop::collection::vec(cell, cols),
            prop::collection::vec(prop::collection::vec(cell, cols), rows),
        )
            .prop_map(|(headers, rows)| {
                let widths: Vec<usize> = (0..headers.len())
                    .map(|c| {
                        rows.iter()
                            .map(|r| r[c].len())
                            .chain(std::iter::once(headers[c].len()))
                            .max()
                            .unwrap_or(0)
                    })
                    .collect();
                let render = |cells: &[String]| {
                    cells
                        .iter()
                        .zip(&widths)
                        .map(|(cell, w)| format!("{:<width$}", cell, width = w + 3))
                        .collect::<String>()
                        .trim_end()
                        .to_string()
                };
                let mut text = render(&headers);
                for row in &rows {
                    text.push('\n');
                    text.push_str(&render(row));
                }
                (headers, rows, text)
            })
    })
}

proptest! {
    #[test]
    fn rows_always_match_header_width(input in "[ -~\t\n]{0,200}") {
        let out = table_separated(&input);
        for row in &out.table.rows {
            prop_assert_eq!(row.len(), out.table.headers.len());
        }
        prop_assert_eq!(out.lines.len(), out.table.rows.len() + usize::from(!out.lines.is_empty()));
    }

    #[test]
    fn aligned_columns_are_recovered((headers, rows, text) in aligned_table()) {
        let out = table_separated(&text);
        prop_assert_eq!(out.table.headers, headers);
        prop_assert_eq!(out.table.rows, rows);
    }

    #[test]
    fn parsing_never_panics_on_unicode(input in "\\PC{0,120}") {
        let _ = table_separated(&input);
    }
}
