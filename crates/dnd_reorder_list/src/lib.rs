mod list;

pub use dnd_reorder::{Commit, ReorderConfig, ReorderError};
pub use list::{
    DndReorderItem, DndReorderList, DndReorderListState, DndReorderProposal, DndReorderRowState,
    dnd_reorder_list,
};
