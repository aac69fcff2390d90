use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::ReorderConfig;
use crate::error::{ReorderError, Result};
use crate::geometry::{self, RowSize, RowSizeTable};
use crate::shift::shift_for_row;
use crate::target::resolve_target;

/// An item that can be reordered.
///
/// The id must be unique within a list and stable across reorders; measured sizes follow items by
/// id when the order changes.
pub trait ReorderItem {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// Cumulative pointer translation since the gesture started. Only `vertical` is consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Translation {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Translation {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn vertical(vertical: f32) -> Self {
        Self {
            horizontal: 0.,
            vertical,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<Id> {
    source_ix: usize,
    dragging_id: Id,
    target_ix: Option<usize>,
    live_offset: f32,
}

impl<Id> DragSession<Id> {
    pub fn source_index(&self) -> usize {
        self.source_ix
    }

    pub fn dragging_id(&self) -> &Id {
        &self.dragging_id
    }

    /// `None` until the first drag update resolved a slot.
    pub fn target_index(&self) -> Option<usize> {
        self.target_ix
    }

    /// Offset of the floating row from its resting slot.
    pub fn live_offset(&self) -> f32 {
        self.live_offset
    }
}

/// Presentation state left behind by a commit.
///
/// The list has already been reordered. The settled row sits at `row_ix` and should be drawn at
/// `from_offset` relative to its new slot, then animated to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Settle<Id> {
    pub row_ix: usize,
    pub item_id: Id,
    pub from_offset: f32,
    /// Distance the floating row still had to travel from its source slot to its new slot.
    pub settle_offset: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase<Id> {
    Idle,
    Dragging(DragSession<Id>),
    Committing(Settle<Id>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    pub live_offset: f32,
    pub target_ix: usize,
    pub target_changed: bool,
}

/// Result of a completed gesture. `from` indexes the pre-commit list, `to` the post-commit list.
#[derive(Clone, Debug, PartialEq)]
pub struct Commit<Id> {
    pub item_id: Id,
    pub from: usize,
    pub to: usize,
    pub settle_offset: f32,
}

impl<Id> Commit<Id> {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// What the renderer needs for a single row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowDirective {
    pub is_floating: bool,
    pub static_shift: f32,
    pub floating_offset: f32,
}

/// Ordered items plus the geometry and drag state needed to reorder them by dragging.
pub struct ReorderList<T: ReorderItem> {
    items: Vec<T>,
    sizes: RowSizeTable,
    top_offsets: Vec<f32>,
    spacing: f32,
    phase: DragPhase<T::Id>,
}

impl<T: ReorderItem> Default for ReorderList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            sizes: RowSizeTable::default(),
            top_offsets: Vec::new(),
            spacing: 0.,
            phase: DragPhase::Idle,
        }
    }
}

impl<T: ReorderItem> ReorderList<T> {
    pub fn new(items: impl Into<Vec<T>>, config: ReorderConfig) -> Result<Self> {
        config.validate()?;

        let items = items.into();
        let sizes = RowSizeTable::new(items.len());
        let mut list = Self {
            items,
            sizes,
            top_offsets: Vec::new(),
            spacing: config.spacing(),
            phase: DragPhase::Idle,
        };
        list.recompute_offsets();
        Ok(list)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn sizes(&self) -> &RowSizeTable {
        &self.sizes
    }

    pub fn top_offsets(&self) -> &[f32] {
        &self.top_offsets
    }

    pub fn content_height(&self) -> f32 {
        geometry::content_height(&self.top_offsets, &self.sizes)
    }

    /// Replace the items. Measurements are dropped since they are keyed by position.
    ///
    /// Rejected while a drag is in progress: the session holds indices into the current list.
    pub fn set_items(&mut self, items: impl Into<Vec<T>>) -> Result<()> {
        if self.is_dragging() {
            return Err(ReorderError::SessionActive);
        }

        self.items = items.into();
        self.sizes.reset(self.items.len());
        self.phase = DragPhase::Idle;
        self.recompute_offsets();
        Ok(())
    }

    /// Apply a new configuration, keeping items and measurements.
    pub fn set_config(&mut self, config: ReorderConfig) -> Result<()> {
        config.validate()?;
        if self.is_dragging() {
            return Err(ReorderError::SessionActive);
        }

        self.spacing = config.spacing();
        self.recompute_offsets();
        Ok(())
    }

    /// Record the measured size of a row. Returns whether the geometry changed.
    pub fn report_size(&mut self, ix: usize, size: RowSize) -> bool {
        if !self.sizes.set(ix, size) {
            return false;
        }
        self.recompute_offsets();
        true
    }

    /// Record several measurements and recompute offsets once.
    pub fn report_sizes(&mut self, sizes: impl IntoIterator<Item = (usize, RowSize)>) -> bool {
        let mut changed = false;
        for (ix, size) in sizes {
            changed |= self.sizes.set(ix, size);
        }
        if changed {
            self.recompute_offsets();
        }
        changed
    }

    fn recompute_offsets(&mut self) {
        self.top_offsets = geometry::top_offsets(self.items.len(), &self.sizes, self.spacing);
        tracing::trace!(rows = self.top_offsets.len(), "recomputed row offsets");
    }

    fn top(&self, ix: usize) -> f32 {
        self.top_offsets.get(ix).copied().unwrap_or(0.)
    }

    /// Clamp the dragged row's top edge so it never leaves the span of the list.
    fn clamp_candidate(&self, source_ix: usize, delta_y: f32) -> f32 {
        let (Some(&min_y), Some(&last_top)) = (self.top_offsets.first(), self.top_offsets.last())
        else {
            return 0.;
        };

        let last_ix = self.top_offsets.len() - 1;
        let max_y = last_top + self.sizes.height(last_ix) - self.sizes.height(source_ix);
        let delta_y = if delta_y.is_finite() { delta_y } else { 0. };

        // Not `f32::clamp`: it panics if the bounds ever cross.
        (self.top(source_ix) + delta_y).min(max_y).max(min_y)
    }

    /// Feed a drag update for `row_ix`.
    ///
    /// The first update after idle starts a session for that row. Updates for any other row while
    /// a session is active are ignored, as are rows outside the list.
    pub fn drag_changed(&mut self, row_ix: usize, translation: Translation) -> Option<DragUpdate> {
        if row_ix >= self.items.len() {
            tracing::trace!(row_ix, len = self.items.len(), "ignoring drag for unknown row");
            return None;
        }

        match self.source_index() {
            Some(source_ix) if source_ix != row_ix => {
                tracing::debug!(row_ix, source_ix, "ignoring drag for a second row");
                return None;
            }
            Some(_) => {}
            None => {
                let dragging_id = self.items[row_ix].id();
                tracing::debug!(row_ix, ?dragging_id, "drag session started");
                self.phase = DragPhase::Dragging(DragSession {
                    source_ix: row_ix,
                    dragging_id,
                    target_ix: None,
                    live_offset: 0.,
                });
            }
        }

        let candidate_y = self.clamp_candidate(row_ix, translation.vertical);
        let live_offset = candidate_y - self.top(row_ix);
        let target_ix = resolve_target(candidate_y, row_ix, &self.sizes, &self.top_offsets);

        let DragPhase::Dragging(session) = &mut self.phase else {
            return None;
        };
        session.live_offset = live_offset;
        let target_changed = session.target_ix.unwrap_or(session.source_ix) != target_ix;
        if target_changed {
            tracing::trace!(source_ix = session.source_ix, target_ix, "drag target changed");
        }
        session.target_ix = Some(target_ix);

        Some(DragUpdate {
            live_offset,
            target_ix,
            target_changed,
        })
    }

    /// Finish the gesture for `row_ix`, reorder the items and enter the settle phase.
    pub fn drag_ended(&mut self, row_ix: usize) -> Option<Commit<T::Id>> {
        let session = match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(session) if session.source_ix == row_ix => session,
            phase => {
                self.phase = phase;
                return None;
            }
        };
        Some(self.commit(session))
    }

    /// Abandon the active gesture. Settles the row back into its source slot.
    pub fn cancel_drag(&mut self) -> Option<Commit<T::Id>> {
        let mut session = match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(session) => session,
            phase => {
                self.phase = phase;
                return None;
            }
        };

        tracing::debug!(source_ix = session.source_ix, "drag cancelled");
        session.target_ix = Some(session.source_ix);
        Some(self.commit(session))
    }

    /// Signal that the settle animation finished.
    pub fn finish_settle(&mut self) -> bool {
        if matches!(self.phase, DragPhase::Committing(_)) {
            self.phase = DragPhase::Idle;
            return true;
        }
        false
    }

    fn commit(&mut self, session: DragSession<T::Id>) -> Commit<T::Id> {
        let len = self.items.len();
        let from = session.source_ix;
        if from >= len {
            tracing::warn!(from, len, "drag source no longer in list; dropping gesture");
            return Commit {
                item_id: session.dragging_id,
                from,
                to: from,
                settle_offset: 0.,
            };
        }

        let mut to = session.target_ix.unwrap_or(from);
        if to >= len {
            tracing::warn!(to, len, "clamping stale drag target");
            to = len - 1;
        }

        let old_top = self.top(from);
        let size_for_item: HashMap<T::Id, f32> = self
            .items
            .iter()
            .zip(self.sizes.heights())
            .map(|(item, height)| (item.id(), height))
            .collect();

        let mut order: Vec<T::Id> = self.items.iter().map(|item| item.id()).collect();
        let moved = order.remove(from);
        order.insert(to, moved);
        let new_positions = geometry::offsets_from_heights(
            order
                .iter()
                .map(|id| size_for_item.get(id).copied().unwrap_or(0.)),
            self.spacing,
        );
        let settle_offset = new_positions.get(to).copied().unwrap_or(0.) - old_top;

        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            self.sizes.move_row(from, to);
            self.recompute_offsets();
        }

        tracing::debug!(from, to, settle_offset, item_id = ?session.dragging_id, "drag committed");

        self.phase = DragPhase::Committing(Settle {
            row_ix: to,
            item_id: session.dragging_id.clone(),
            from_offset: session.live_offset - settle_offset,
            settle_offset,
        });

        Commit {
            item_id: session.dragging_id,
            from,
            to,
            settle_offset,
        }
    }

    pub fn phase(&self) -> &DragPhase<T::Id> {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession<T::Id>> {
        match &self.phase {
            DragPhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    pub fn settle(&self) -> Option<&Settle<T::Id>> {
        match &self.phase {
            DragPhase::Committing(settle) => Some(settle),
            _ => None,
        }
    }

    pub fn source_index(&self) -> Option<usize> {
        self.session().map(DragSession::source_index)
    }

    pub fn target_index(&self) -> Option<usize> {
        self.session().and_then(DragSession::target_index)
    }

    pub fn is_floating(&self, ix: usize) -> bool {
        match &self.phase {
            DragPhase::Idle => false,
            DragPhase::Dragging(session) => session.source_ix == ix,
            DragPhase::Committing(settle) => settle.row_ix == ix,
        }
    }

    /// Displacement of a non-floating row during a drag.
    pub fn shift_for(&self, ix: usize) -> f32 {
        let Some(session) = self.session() else {
            return 0.;
        };
        if ix == session.source_ix {
            return 0.;
        }

        let target_ix = session.target_ix.unwrap_or(session.source_ix);
        shift_for_row(
            ix,
            session.source_ix,
            target_ix,
            self.sizes.height(session.source_ix),
            self.spacing,
        )
    }

    /// Offset of the floating row from the slot it occupies in the current order.
    ///
    /// While dragging this is the live offset from the source slot. While settling the list is
    /// already reordered, so it is the settle start relative to the new slot; the renderer
    /// animates it to zero.
    pub fn floating_offset(&self) -> f32 {
        match &self.phase {
            DragPhase::Idle => 0.,
            DragPhase::Dragging(session) => session.live_offset,
            DragPhase::Committing(settle) => settle.from_offset,
        }
    }

    pub fn row_directive(&self, ix: usize) -> RowDirective {
        let is_floating = self.is_floating(ix);
        RowDirective {
            is_floating,
            static_shift: self.shift_for(ix),
            floating_offset: if is_floating {
                self.floating_offset()
            } else {
                0.
            },
        }
    }
}
