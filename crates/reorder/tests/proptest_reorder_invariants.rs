//! Property-based invariant tests for the reorder engine.
//!
//! 1. Offsets are deterministic and non-decreasing by at least each row's height.
//! 2. A commit never changes the set of items, only their order.
//! 3. The resolved target always stays inside the list.
//! 4. Shifts only touch rows between source and target, by exactly one span.
//! 5. A zero-translation gesture leaves the order untouched.

use dnd_reorder::geometry::{row_centers, top_offsets};
use dnd_reorder::{
    ReorderConfig, ReorderItem, ReorderList, RowSize, RowSizeTable, Translation, shift_for_row,
};
use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Item(u32);

impl ReorderItem for Item {
    type Id = u32;

    fn id(&self) -> u32 {
        self.0
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn heights(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(0u16..=400, 0..=max_len)
        .prop_map(|hs| hs.into_iter().map(f32::from).collect())
}

fn table(heights: &[f32]) -> RowSizeTable {
    let mut sizes = RowSizeTable::new(heights.len());
    for (ix, h) in heights.iter().enumerate() {
        sizes.set(ix, RowSize::with_height(*h));
    }
    sizes
}

fn measured(heights: &[f32], spacing: f32) -> ReorderList<Item> {
    let items: Vec<Item> = (0..heights.len() as u32).map(Item).collect();
    let mut list =
        ReorderList::new(items, ReorderConfig::default().with_spacing(spacing)).unwrap();
    list.report_sizes(
        heights
            .iter()
            .enumerate()
            .map(|(ix, h)| (ix, RowSize::with_height(*h))),
    );
    list
}

fn ids(list: &ReorderList<Item>) -> Vec<u32> {
    list.items().iter().map(|item| item.0).collect()
}

// ── Geometry ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn offsets_are_deterministic_and_monotonic(hs in heights(40), spacing in 0u8..=24) {
        let spacing = f32::from(spacing);
        let sizes = table(&hs);
        let tops = top_offsets(hs.len(), &sizes, spacing);

        prop_assert_eq!(&tops, &top_offsets(hs.len(), &sizes, spacing));
        prop_assert_eq!(tops.len(), hs.len());
        if let Some(first) = tops.first() {
            prop_assert_eq!(*first, 0.);
        }
        for ix in 1..tops.len() {
            prop_assert!(tops[ix] >= tops[ix - 1] + hs[ix - 1]);
        }
        prop_assert_eq!(row_centers(&tops, &sizes).len(), hs.len());
    }
}

// ── Gestures ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn commit_preserves_membership(
        hs in heights(24),
        spacing in 0u8..=16,
        source in any::<prop::sample::Index>(),
        moves in proptest::collection::vec(-2000i32..=2000, 1..8),
    ) {
        prop_assume!(!hs.is_empty());
        let mut list = measured(&hs, f32::from(spacing));
        let source = source.index(hs.len());

        for dy in moves {
            let update = list.drag_changed(source, Translation::vertical(dy as f32)).unwrap();
            prop_assert!(update.target_ix < hs.len());
        }
        let commit = list.drag_ended(source).unwrap();
        prop_assert!(commit.to < hs.len());

        let mut after = ids(&list);
        after.sort_unstable();
        prop_assert_eq!(after, (0..hs.len() as u32).collect::<Vec<_>>());
        prop_assert_eq!(list.items()[commit.to].0, source as u32);
        prop_assert_eq!(list.sizes().height(commit.to), hs[source]);
    }

    #[test]
    fn zero_translation_is_a_noop(
        hs in proptest::collection::vec(1u16..=400, 1..24),
        source in any::<prop::sample::Index>(),
    ) {
        let hs: Vec<f32> = hs.into_iter().map(f32::from).collect();
        let mut list = measured(&hs, 0.);
        let source = source.index(hs.len());
        let before = ids(&list);

        list.drag_changed(source, Translation::vertical(0.));
        let commit = list.drag_ended(source).unwrap();

        prop_assert!(commit.is_noop());
        prop_assert_eq!(commit.settle_offset, 0.);
        prop_assert_eq!(ids(&list), before);
    }

    #[test]
    fn shifts_touch_only_rows_between_source_and_target(
        len in 1usize..30,
        source in any::<prop::sample::Index>(),
        target in any::<prop::sample::Index>(),
        height in 1u16..200,
    ) {
        let source = source.index(len);
        let target = target.index(len);
        let span = f32::from(height) + 4.;

        for row in 0..len {
            let shift = shift_for_row(row, source, target, f32::from(height), 4.);
            let between = (source < target && row > source && row <= target)
                || (source > target && row >= target && row < source);
            if between {
                prop_assert_eq!(shift.abs(), span);
            } else {
                prop_assert_eq!(shift, 0.);
            }
        }
    }
}
