use dnd_reorder::{ReorderConfig, ReorderItem, ReorderList, RowSize, Translation};

#[derive(Clone, Debug, PartialEq)]
struct Card {
    key: String,
}

impl ReorderItem for Card {
    type Id = String;

    fn id(&self) -> String {
        self.key.clone()
    }
}

fn cards(keys: &[&str]) -> Vec<Card> {
    keys.iter()
        .map(|key| Card {
            key: key.to_string(),
        })
        .collect()
}

fn measured(keys: &[&str], heights: &[f32], spacing: f32) -> ReorderList<Card> {
    let mut list =
        ReorderList::new(cards(keys), ReorderConfig::default().with_spacing(spacing)).unwrap();
    list.report_sizes(
        heights
            .iter()
            .enumerate()
            .map(|(ix, h)| (ix, RowSize::new(320., *h))),
    );
    list
}

fn keys(list: &ReorderList<Card>) -> Vec<String> {
    list.items().iter().map(|card| card.key.clone()).collect()
}

#[test]
fn downward_drag_lands_next_to_nearest_center() {
    let mut list = measured(&["A", "B", "C", "D"], &[40., 40., 40., 40.], 0.);

    // Dragged center goes 20 -> 100, which is C's center.
    for dy in [10., 35., 60., 80.] {
        list.drag_changed(0, Translation::new(3., dy));
    }
    assert_eq!(list.target_index(), Some(2));

    let commit = list.drag_ended(0).unwrap();
    assert_eq!(commit.item_id, "A");
    assert_eq!((commit.from, commit.to), (0, 2));
    assert_eq!(keys(&list), vec!["B", "C", "A", "D"]);
}

#[test]
fn upward_drag_shifts_rows_down() {
    let mut list = measured(&["A", "B", "C", "D", "E"], &[50.; 5], 10.);
    list.drag_changed(4, Translation::vertical(-180.));

    assert_eq!(list.target_index(), Some(1));
    let shifts: Vec<f32> = (0..5).map(|ix| list.shift_for(ix)).collect();
    assert_eq!(shifts, vec![0., 60., 60., 60., 0.]);

    list.drag_ended(4).unwrap();
    assert_eq!(keys(&list), vec!["A", "E", "B", "C", "D"]);
}

#[test]
fn zero_translation_round_trips() {
    let mut list = measured(&["A", "B", "C"], &[30., 45., 60.], 4.);
    let before = keys(&list);

    list.drag_changed(1, Translation::vertical(0.));
    let commit = list.drag_ended(1).unwrap();

    assert!(commit.is_noop());
    assert_eq!(commit.settle_offset, 0.);
    assert_eq!(keys(&list), before);
}

#[test]
fn last_row_never_targets_past_the_end() {
    let mut list = measured(&["A", "B", "C"], &[20., 20., 20.], 2.);
    let update = list.drag_changed(2, Translation::vertical(10_000.)).unwrap();

    assert_eq!(update.target_ix, 2);
    assert_eq!(update.live_offset, 0.);
    assert!(list.drag_ended(2).unwrap().is_noop());
}

#[test]
fn settle_offset_accounts_for_variable_heights() {
    // Tops: A=0, B=10, C=40, D=100.
    let mut list = measured(&["A", "B", "C", "D"], &[10., 30., 60., 20.], 0.);
    list.drag_changed(1, Translation::vertical(200.));
    assert_eq!(list.target_index(), Some(3));

    let commit = list.drag_ended(1).unwrap();
    assert_eq!(keys(&list), vec!["A", "C", "D", "B"]);
    // New order tops: A=0, C=10, D=70, B=90.
    assert_eq!(commit.settle_offset, 80.);
    assert_eq!(list.top_offsets(), &[0., 10., 70., 90.]);
}

#[test]
fn measured_sizes_travel_with_their_items() {
    let mut list = measured(&["A", "B", "C"], &[10., 20., 30.], 0.);
    list.drag_changed(0, Translation::vertical(100.));
    list.drag_ended(0).unwrap();

    assert_eq!(keys(&list), vec!["B", "C", "A"]);
    let heights: Vec<f32> = list.sizes().heights().collect();
    assert_eq!(heights, vec![20., 30., 10.]);
}

#[test]
fn size_change_mid_drag_is_seen_by_the_next_update() {
    let mut list = measured(&["A", "B", "C"], &[40., 40., 40.], 0.);
    list.drag_changed(0, Translation::vertical(30.));
    assert_eq!(list.target_index(), Some(1));

    // B grows, so its center moves from 60 to 140.
    assert!(list.report_size(1, RowSize::new(320., 200.)));
    list.drag_changed(0, Translation::vertical(30.));
    assert_eq!(list.target_index(), Some(0));
}

#[test]
fn repeated_identical_reports_are_idempotent() {
    let mut list = measured(&["A", "B"], &[40., 40.], 0.);
    let before = list.top_offsets().to_vec();
    assert!(!list.report_size(0, RowSize::new(320., 40.)));
    assert_eq!(list.top_offsets(), before.as_slice());
}

#[test]
fn empty_and_single_item_lists_are_noops() {
    let mut empty = measured(&[], &[], 0.);
    assert_eq!(empty.drag_changed(0, Translation::vertical(50.)), None);
    assert_eq!(empty.drag_ended(0), None);

    let mut single = measured(&["A"], &[40.], 0.);
    let update = single.drag_changed(0, Translation::vertical(500.)).unwrap();
    assert_eq!(update.target_ix, 0);
    let commit = single.drag_ended(0).unwrap();
    assert!(commit.is_noop());
    assert_eq!(commit.settle_offset, 0.);
    assert_eq!(keys(&single), vec!["A"]);
}
