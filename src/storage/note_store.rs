use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::entity::{Note, NoteCreate, NotePatch};
use crate::error::{BoardError, Result};

/// In-memory note store.
///
/// Each operation is atomic for its key; there are no cross-note
/// transactions. Contents live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: DashMap<String, Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notes, back to front (z ascending, ties by id).
    pub fn list(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes.iter().map(|entry| entry.value().clone()).collect();
        notes.sort_by(|a, b| a.z.cmp(&b.z).then_with(|| a.id.cmp(&b.id)));
        notes
    }

    /// Insert a new note with a freshly generated id.
    pub fn create(&self, fields: NoteCreate) -> Note {
        let note = Note {
            id: Uuid::new_v4().simple().to_string(),
            x: fields.x,
            y: fields.y,
            w: fields.w,
            h: fields.h,
            text: fields.text.unwrap_or_default(),
            color: fields.color.unwrap_or_default(),
            z: fields.z.unwrap_or(0),
        };

        self.notes.insert(note.id.clone(), note.clone());
        debug!(id = %note.id, "created note");
        note
    }

    pub fn get(&self, id: &str) -> Option<Note> {
        self.notes.get(id).map(|entry| entry.value().clone())
    }

    /// Apply `patch` to the note with `id` and return the updated note.
    ///
    /// A missing note is reported before the patch is validated.
    pub fn update(&self, id: &str, patch: &NotePatch) -> Result<Note> {
        let mut entry = self
            .notes
            .get_mut(id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;

        patch.validate()?;
        patch.apply_to(entry.value_mut());
        debug!(id, "updated note");
        Ok(entry.value().clone())
    }

    /// Remove a note. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.notes.remove(id).is_some();
        if removed {
            debug!(id, "deleted note");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
