/// Measured on-screen size of a single row.
///
/// For vertical lists, only `height` is used.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowSize {
    pub width: f32,
    pub height: f32,
}

impl RowSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn with_height(height: f32) -> Self {
        Self { width: 0., height }
    }
}

/// Row index (in current order) to measured size.
///
/// Rows that were never measured count as zero height.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowSizeTable {
    sizes: Vec<Option<RowSize>>,
}

impl RowSizeTable {
    pub fn new(len: usize) -> Self {
        Self {
            sizes: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn get(&self, ix: usize) -> Option<RowSize> {
        self.sizes.get(ix).copied().flatten()
    }

    pub fn height(&self, ix: usize) -> f32 {
        self.get(ix).map(|size| size.height).unwrap_or(0.)
    }

    /// Store a measured size. Returns `false` when the row is out of range or the
    /// sanitized size equals the stored one.
    pub fn set(&mut self, ix: usize, size: RowSize) -> bool {
        let Some(slot) = self.sizes.get_mut(ix) else {
            return false;
        };

        let size = sanitize_row_size(size);
        if *slot == Some(size) {
            return false;
        }
        *slot = Some(size);
        true
    }

    /// Drop every measurement and size the table for `len` rows.
    pub fn reset(&mut self, len: usize) {
        self.sizes.clear();
        self.sizes.resize(len, None);
    }

    /// Move the entry at `from` to `to`, the same way `Vec::remove` + `Vec::insert` moves items.
    pub fn move_row(&mut self, from: usize, to: usize) {
        if from >= self.sizes.len() || to >= self.sizes.len() || from == to {
            return;
        }
        let size = self.sizes.remove(from);
        self.sizes.insert(to, size);
    }

    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.sizes.len()).map(|ix| self.height(ix))
    }
}

/// Top offset of every row for the first `item_count` rows of `sizes`.
pub fn top_offsets(item_count: usize, sizes: &RowSizeTable, spacing: f32) -> Vec<f32> {
    offsets_from_heights((0..item_count).map(|ix| sizes.height(ix)), spacing)
}

/// Top offsets for an arbitrary sequence of row heights.
///
/// `offset[0] = 0` and `offset[i] = offset[i - 1] + height(i - 1) + spacing`.
pub fn offsets_from_heights(heights: impl IntoIterator<Item = f32>, spacing: f32) -> Vec<f32> {
    let mut offsets = Vec::new();
    let mut y = 0.;
    for height in heights {
        offsets.push(y);
        y += height + spacing;
    }
    offsets
}

pub fn row_centers(top_offsets: &[f32], sizes: &RowSizeTable) -> Vec<f32> {
    top_offsets
        .iter()
        .enumerate()
        .map(|(ix, top)| top + sizes.height(ix) / 2.)
        .collect()
}

/// Bottom edge of the last row, or zero for an empty list.
pub fn content_height(top_offsets: &[f32], sizes: &RowSizeTable) -> f32 {
    match top_offsets.last() {
        Some(top) => top + sizes.height(top_offsets.len() - 1),
        None => 0.,
    }
}

fn sanitize_row_size(mut size: RowSize) -> RowSize {
    if !size.height.is_finite() || size.height < 0. {
        size.height = 0.;
    }
    if !size.width.is_finite() || size.width < 0. {
        size.width = 0.;
    }
    size
}
