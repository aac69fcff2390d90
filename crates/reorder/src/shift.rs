/// Vertical displacement for a non-dragged row while the dragged row hovers over `target_ix`.
///
/// Rows between the source and the target slide by the dragged row's height plus spacing to
/// open a gap at the target and close the one left at the source.
pub fn shift_for_row(
    row_ix: usize,
    source_ix: usize,
    target_ix: usize,
    dragged_height: f32,
    spacing: f32,
) -> f32 {
    let span = dragged_height + spacing;

    if source_ix < target_ix && source_ix < row_ix && row_ix <= target_ix {
        -span
    } else if source_ix > target_ix && target_ix <= row_ix && row_ix < source_ix {
        span
    } else {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifts(source: usize, target: usize) -> Vec<f32> {
        (0..5)
            .map(|row| shift_for_row(row, source, target, 50., 10.))
            .collect()
    }

    #[test]
    fn dragging_down_slides_rows_up() {
        assert_eq!(shifts(0, 3), vec![0., -60., -60., -60., 0.]);
    }

    #[test]
    fn dragging_up_slides_rows_down() {
        assert_eq!(shifts(4, 1), vec![0., 60., 60., 60., 0.]);
    }

    #[test]
    fn no_shift_when_target_is_source() {
        assert_eq!(shifts(2, 2), vec![0.; 5]);
    }
}
