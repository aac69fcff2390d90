use crate::geometry::{RowSizeTable, row_centers};

/// Pick the slot the dragged row should occupy.
///
/// The dragged row's center (`candidate_top_y + height(source_ix) / 2`) is compared against the
/// row centers of the pre-drag order, and the nearest one wins. Ties go to the lowest index.
pub fn resolve_target(
    candidate_top_y: f32,
    source_ix: usize,
    sizes: &RowSizeTable,
    top_offsets: &[f32],
) -> usize {
    let dragged_center = candidate_top_y + sizes.height(source_ix) / 2.;

    let mut best: Option<(usize, f32)> = None;
    for (ix, center) in row_centers(top_offsets, sizes).into_iter().enumerate() {
        let distance = (center - dragged_center).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((ix, distance)),
        }
    }

    best.map(|(ix, _)| ix).unwrap_or(source_ix)
}
