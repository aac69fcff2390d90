//! Drag-to-reorder engine for vertical lists with variable-height rows.
//!
//! The host reports measured row sizes and a stream of drag updates; the engine resolves the slot
//! the dragged row would land in, tells the renderer how far every other row should slide, and
//! reorders the items once the gesture ends.

mod config;
mod error;
pub mod geometry;
mod session;
mod shift;
mod target;

pub use config::ReorderConfig;
pub use error::{ReorderError, Result};
pub use geometry::{RowSize, RowSizeTable};
pub use session::{
    Commit, DragPhase, DragSession, DragUpdate, ReorderItem, ReorderList, RowDirective, Settle,
    Translation,
};
pub use shift::shift_for_row;
pub use target::resolve_target;
