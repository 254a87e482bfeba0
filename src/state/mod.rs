//! Application state modules
//!
//! View-local state grouped out of DashboardApp. The chapter data itself
//! lives in the store; these hold only what the view layer owns.

mod notes;
mod ui;

pub use notes::{NoteKey, NotesState};
pub use ui::{Layout, UiState};
