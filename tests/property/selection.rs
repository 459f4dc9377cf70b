//! Property-based tests for row selection

use proptest::prelude::*;
use xrender::command::index_directive;
use xrender::renderer::table::resolve_selected_index;

/// Selected row always lands inside the table, whatever the previous value was.
#[test]
fn test_selection_is_clamped_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<String>(), 1usize..500), |(previous, rows)| {
            let idx = resolve_selected_index(&previous, rows);
            assert!(idx < rows);
            Ok(())
        })
        .unwrap();
}

#[test]
fn test_in_range_selection_is_kept_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..500, 1usize..500), |(idx, rows)| {
            let expected = idx.min(rows - 1);
            assert_eq!(resolve_selected_index(&index_directive(idx), rows), expected);
            Ok(())
        })
        .unwrap();
}

proptest! {
    #[test]
    fn missing_selection_defaults_to_first_row(rows in 1usize..100) {
        prop_assert_eq!(resolve_selected_index("", rows), 0);
    }
}
