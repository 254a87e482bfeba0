//! Per-chapter notes.
//!
//! Notes are kept in memory for the session and never written to disk.
//! At most one card is in edit mode at a time; its text lives in a draft
//! until saved.

use std::collections::HashMap;

use crate::chapter::{Chapter, Subject};

/// Identifies a chapter card. Chapter names only need to be unique within a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub subject: Subject,
    pub chapter: String,
}

impl NoteKey {
    pub fn for_chapter(chapter: &Chapter) -> Self {
        Self {
            subject: chapter.subject,
            chapter: chapter.chapter.clone(),
        }
    }
}

/// Notes state
#[derive(Debug, Default)]
pub struct NotesState {
    notes: HashMap<NoteKey, String>,
    /// Card currently being edited
    editing: Option<NoteKey>,
    /// Text of the note being edited
    pub draft: String,
}

impl NotesState {
    pub fn note(&self, key: &NoteKey) -> Option<&str> {
        self.notes.get(key).map(String::as_str)
    }

    pub fn is_editing(&self, key: &NoteKey) -> bool {
        self.editing.as_ref() == Some(key)
    }

    /// Open the editor for a card, seeded with its saved note.
    /// Any unsaved draft on another card is discarded.
    pub fn start_editing(&mut self, key: NoteKey) {
        self.draft = self.note(&key).unwrap_or_default().to_string();
        self.editing = Some(key);
    }

    /// Store the draft. An empty draft removes the note.
    pub fn save(&mut self) {
        let Some(key) = self.editing.take() else {
            return;
        };
        let text = std::mem::take(&mut self.draft);
        if text.trim().is_empty() {
            self.notes.remove(&key);
        } else {
            self.notes.insert(key, text);
        }
    }

    pub fn cancel(&mut self) {
        self.editing = None;
        self.draft.clear();
    }

    pub fn delete(&mut self, key: &NoteKey) {
        self.notes.remove(key);
        if self.is_editing(key) {
            self.cancel();
        }
    }

    pub fn count(&self) -> usize {
        self.notes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(subject: Subject, name: &str) -> NoteKey {
        NoteKey {
            subject,
            chapter: name.to_string(),
        }
    }

    #[test]
    fn test_edit_and_save() {
        let mut notes = NotesState::default();
        let optics = key(Subject::Physics, "Optics");

        notes.start_editing(optics.clone());
        assert!(notes.is_editing(&optics));
        assert_eq!(notes.draft, "");

        notes.draft.push_str("Revise lens formula");
        notes.save();
        assert!(!notes.is_editing(&optics));
        assert_eq!(notes.note(&optics), Some("Revise lens formula"));

        notes.start_editing(optics.clone());
        assert_eq!(notes.draft, "Revise lens formula");
    }

    #[test]
    fn test_cancel_keeps_saved_note() {
        let mut notes = NotesState::default();
        let optics = key(Subject::Physics, "Optics");
        notes.start_editing(optics.clone());
        notes.draft = "first".to_string();
        notes.save();

        notes.start_editing(optics.clone());
        notes.draft = "second".to_string();
        notes.cancel();
        assert_eq!(notes.note(&optics), Some("first"));
    }

    #[test]
    fn test_empty_draft_removes_note() {
        let mut notes = NotesState::default();
        let optics = key(Subject::Physics, "Optics");
        notes.start_editing(optics.clone());
        notes.draft = "x".to_string();
        notes.save();

        notes.start_editing(optics.clone());
        notes.draft = "   ".to_string();
        notes.save();
        assert_eq!(notes.note(&optics), None);
        assert_eq!(notes.count(), 0);
    }

    #[test]
    fn test_same_name_in_two_subjects() {
        let mut notes = NotesState::default();
        let physics = key(Subject::Physics, "Thermodynamics");
        let chemistry = key(Subject::Chemistry, "Thermodynamics");

        notes.start_editing(physics.clone());
        notes.draft = "heat engines".to_string();
        notes.save();

        assert_eq!(notes.note(&physics), Some("heat engines"));
        assert_eq!(notes.note(&chemistry), None);
    }

    #[test]
    fn test_delete_while_editing() {
        let mut notes = NotesState::default();
        let optics = key(Subject::Physics, "Optics");
        notes.start_editing(optics.clone());
        notes.draft = "x".to_string();
        notes.save();
        notes.start_editing(optics.clone());

        notes.delete(&optics);
        assert!(!notes.is_editing(&optics));
        assert_eq!(notes.note(&optics), None);
    }
}
