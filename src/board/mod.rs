//! Board controller: the working copy of the notes behind a canvas UI.
//!
//! Every mutation is applied locally first. Field edits are persisted through
//! a per-note debounce; create and delete go out immediately and are rolled
//! back if the server refuses them. The host feeds pointer and edit events in
//! and renders from [`Board::notes`].

mod gesture;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::client::{NotesApi, UiColor, UiNote, UiNoteCreate, UiNotePatch};
use crate::config::BoardSettings;

pub use gesture::{
    clamp, Gesture, GestureMode, Layout, Point, Rect, Size, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH,
};

/// Prefix of ids handed out before the server has confirmed a note.
pub const TEMP_ID_PREFIX: &str = "tmp_";

pub const MAX_NEW_NOTE_SIZE: f64 = 420.0;

/// New notes cascade from this corner so they don't land on top of each other.
const CASCADE_ORIGIN: f64 = 24.0;
const CASCADE_STEP: f64 = 18.0;
const CASCADE_STEPS: usize = 8;

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

fn new_temp_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}{}", TEMP_ID_PREFIX, &raw[..8])
}

/// Toolbar settings for the next note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDraft {
    pub w: f64,
    pub h: f64,
    pub color: UiColor,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            w: 220.0,
            h: 180.0,
            color: UiColor::Yellow,
        }
    }
}

struct PendingWrite {
    generation: u64,
    cancel: CancellationToken,
    patch: UiNotePatch,
}

#[derive(Default)]
struct BoardState {
    notes: Vec<UiNote>,
    gesture: Option<Gesture>,
    trash_active: bool,
    layout: Option<Layout>,
    pending: HashMap<String, PendingWrite>,
    /// Bumped on every local mutation of a note.
    revisions: HashMap<String, u64>,
    next_generation: u64,
}

impl BoardState {
    fn find(&self, id: &str) -> Option<&UiNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut UiNote> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    fn max_z(&self) -> i64 {
        self.notes.iter().fold(0, |m, n| m.max(n.z))
    }

    fn revision(&self, id: &str) -> u64 {
        self.revisions.get(id).copied().unwrap_or(0)
    }

    fn touch(&mut self, id: &str) {
        *self.revisions.entry(id.to_string()).or_insert(0) += 1;
    }

    fn is_dragging(&self, id: &str) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.note_id == id)
    }

    fn cancel_pending(&mut self, id: &str) {
        if let Some(pending) = self.pending.remove(id) {
            pending.cancel.cancel();
        }
    }
}

struct Inner<A> {
    api: Arc<A>,
    debounce: Duration,
    default_layout: Layout,
    state: Mutex<BoardState>,
}

/// Handle to a board. Clones share the same state.
pub struct Board<A: NotesApi + 'static> {
    inner: Arc<Inner<A>>,
}

impl<A: NotesApi + 'static> Clone for Board<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: NotesApi + 'static> Board<A> {
    pub fn new(api: Arc<A>, settings: &BoardSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                debounce: settings.debounce(),
                default_layout: Layout {
                    canvas: Size {
                        width: settings.canvas_width,
                        height: settings.canvas_height,
                    },
                    trash: None,
                },
                state: Mutex::new(BoardState::default()),
            }),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Notes in list order.
    pub async fn notes(&self) -> Vec<UiNote> {
        self.inner.state.lock().await.notes.clone()
    }

    pub async fn note(&self, id: &str) -> Option<UiNote> {
        self.inner.state.lock().await.find(id).cloned()
    }

    pub async fn gesture(&self) -> Option<Gesture> {
        self.inner.state.lock().await.gesture.clone()
    }

    pub async fn trash_active(&self) -> bool {
        self.inner.state.lock().await.trash_active
    }

    /// Number of debounced writes scheduled but not yet sent.
    pub async fn pending_writes(&self) -> usize {
        self.inner.state.lock().await.pending.len()
    }

    pub async fn layout(&self) -> Layout {
        self.inner
            .state
            .lock()
            .await
            .layout
            .unwrap_or(self.inner.default_layout)
    }

    pub async fn set_layout(&self, layout: Layout) {
        self.inner.state.lock().await.layout = Some(layout);
    }

    // ========================================================================
    // Load / create / edit / delete
    // ========================================================================

    /// Replace the working copy with the server's list.
    ///
    /// A failed fetch leaves the board empty rather than surfacing an error.
    pub async fn load(&self) -> usize {
        let notes = match self.inner.api.get_notes().await {
            Ok(notes) => notes,
            Err(e) => {
                error!(error = %e, "failed to load notes");
                Vec::new()
            }
        };

        let mut state = self.inner.state.lock().await;
        state.notes = notes;
        state.notes.len()
    }

    /// Add a note optimistically, then swap in the server's copy.
    ///
    /// Returns the confirmed note, or `None` if the server refused it (the
    /// optimistic note is removed again).
    pub async fn create_note(&self, draft: NoteDraft) -> Option<UiNote> {
        let temp_id = new_temp_id();

        let payload = {
            let mut state = self.inner.state.lock().await;
            let offset = (state.notes.len() % CASCADE_STEPS) as f64 * CASCADE_STEP;
            let optimistic = UiNote {
                id: temp_id.clone(),
                x: CASCADE_ORIGIN + offset,
                y: CASCADE_ORIGIN + offset,
                w: clamp(draft.w, MIN_NOTE_WIDTH, MAX_NEW_NOTE_SIZE),
                h: clamp(draft.h, MIN_NOTE_HEIGHT, MAX_NEW_NOTE_SIZE),
                text: String::new(),
                color: draft.color,
                z: state.max_z() + 1,
            };
            state.notes.push(optimistic.clone());

            UiNoteCreate {
                x: optimistic.x,
                y: optimistic.y,
                w: optimistic.w,
                h: optimistic.h,
                text: optimistic.text,
                color: optimistic.color,
                z: optimistic.z,
            }
        };

        match self.inner.api.create_note(&payload).await {
            Ok(created) => {
                let replaced = {
                    let mut state = self.inner.state.lock().await;
                    state.revisions.remove(&temp_id);
                    match state.find_mut(&temp_id) {
                        Some(note) => {
                            *note = created.clone();
                            true
                        }
                        None => false,
                    }
                };

                if !replaced {
                    // Deleted locally while the create was in flight.
                    debug!(id = %created.id, "optimistic note gone, deleting server copy");
                    if let Err(e) = self.inner.api.delete_note(&created.id).await {
                        warn!(id = %created.id, error = %e, "failed to delete orphaned note");
                    }
                }
                Some(created)
            }
            Err(e) => {
                warn!(error = %e, "failed to create note");
                let mut state = self.inner.state.lock().await;
                state.notes.retain(|n| n.id != temp_id);
                state.revisions.remove(&temp_id);
                None
            }
        }
    }

    /// Apply an edit locally and schedule it for persistence.
    pub async fn update_note(&self, id: &str, patch: UiNotePatch) {
        let mut state = self.inner.state.lock().await;
        let Some(note) = state.find_mut(id) else {
            debug!(id, "edit for unknown note ignored");
            return;
        };
        patch.apply_to(note);
        state.touch(id);
        self.schedule_patch(&mut state, id, patch);
    }

    /// Raise a note above every other note.
    pub async fn bring_to_front(&self, id: &str) {
        let mut state = self.inner.state.lock().await;
        self.raise(&mut state, id);
    }

    /// Remove a note optimistically; restore the previous list if the
    /// server delete fails.
    pub async fn delete_note(&self, id: &str) {
        let snapshot = {
            let mut state = self.inner.state.lock().await;
            state.cancel_pending(id);
            let snapshot = state.notes.clone();
            state.notes.retain(|n| n.id != id);
            snapshot
        };

        if !is_temp_id(id) {
            if let Err(e) = self.inner.api.delete_note(id).await {
                warn!(id, error = %e, "failed to delete note, rolling back");
                self.inner.state.lock().await.notes = snapshot;
                return;
            }
        }

        self.inner.state.lock().await.revisions.remove(id);
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Begin dragging a note. Returns `false` if the note is unknown or
    /// another gesture is already active.
    pub async fn start_move(&self, id: &str, pointer: Point) -> bool {
        self.start_gesture(id, GestureMode::Move, pointer).await
    }

    /// Begin resizing a note from its bottom-right corner.
    pub async fn start_resize(&self, id: &str, pointer: Point) -> bool {
        self.start_gesture(id, GestureMode::Resize, pointer).await
    }

    async fn start_gesture(&self, id: &str, mode: GestureMode, pointer: Point) -> bool {
        let mut state = self.inner.state.lock().await;
        if state.gesture.is_some() {
            return false;
        }
        let Some(gesture) = state.find(id).map(|note| Gesture::new(note, mode, pointer)) else {
            return false;
        };

        state.gesture = Some(gesture);
        // The z bump rides along with the gesture's final patch.
        self.raise(&mut state, id);
        true
    }

    pub async fn pointer_move(&self, pointer: Point) {
        let mut state = self.inner.state.lock().await;
        let Some(gesture) = state.gesture.clone() else {
            return;
        };
        let layout = state.layout.unwrap_or(self.inner.default_layout);

        let moved = match state.find_mut(&gesture.note_id) {
            Some(note) => {
                gesture.apply(note, pointer, layout.canvas);
                true
            }
            None => false,
        };
        if moved {
            state.touch(&gesture.note_id);
        }
        state.trash_active = gesture.mode == GestureMode::Move && layout.over_trash(pointer);
    }

    /// Finish the active gesture: delete the note if it was dropped on the
    /// trash, otherwise persist its final position or size.
    pub async fn pointer_up(&self, pointer: Point) {
        let dropped = {
            let mut state = self.inner.state.lock().await;
            let Some(gesture) = state.gesture.take() else {
                return;
            };
            state.trash_active = false;

            let layout = state.layout.unwrap_or(self.inner.default_layout);
            if gesture.mode == GestureMode::Move && layout.over_trash(pointer) {
                Some(gesture.note_id)
            } else {
                let commit = state.find(&gesture.note_id).map(|note| {
                    let mut patch = match gesture.mode {
                        GestureMode::Move => UiNotePatch::position(note.x, note.y),
                        GestureMode::Resize => UiNotePatch::size(note.w, note.h),
                    };
                    patch.z = Some(note.z);
                    patch
                });
                if let Some(patch) = commit {
                    self.schedule_patch(&mut state, &gesture.note_id, patch);
                }
                None
            }
        };

        if let Some(id) = dropped {
            self.delete_note(&id).await;
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn raise(&self, state: &mut BoardState, id: &str) {
        let next_z = state.max_z() + 1;
        let Some(note) = state.find_mut(id) else {
            return;
        };
        note.z = next_z;
        state.touch(id);

        if !state.is_dragging(id) {
            self.schedule_patch(state, id, UiNotePatch::z(next_z));
        }
    }

    /// Schedule `patch` for `id` after the debounce period, replacing any
    /// write still waiting for the same note. Fields of the replaced write
    /// that `patch` does not set are carried over.
    fn schedule_patch(&self, state: &mut BoardState, id: &str, mut patch: UiNotePatch) {
        if is_temp_id(id) {
            debug!(id, "note not confirmed yet, write skipped");
            return;
        }

        if let Some(replaced) = state.pending.remove(id) {
            replaced.cancel.cancel();
            patch.fill_from(replaced.patch);
        }
        state.next_generation += 1;
        let generation = state.next_generation;
        let revision = state.revision(id);
        let cancel = CancellationToken::new();
        state.pending.insert(
            id.to_string(),
            PendingWrite {
                generation,
                cancel: cancel.clone(),
                patch: patch.clone(),
            },
        );

        let board = self.clone();
        let id = id.to_string();
        let delay = self.inner.debounce;
        tokio::spawn(async move {
            let fired = tokio::select! {
                _ = cancel.cancelled() => false,
                _ = tokio::time::sleep(delay) => true,
            };
            if fired {
                board.send_patch(id, generation, revision, patch).await;
            }
        });
    }

    async fn send_patch(&self, id: String, generation: u64, revision: u64, patch: UiNotePatch) {
        {
            let mut state = self.inner.state.lock().await;
            match state.pending.get(&id) {
                Some(pending) if pending.generation == generation => {
                    state.pending.remove(&id);
                }
                // Replaced or cancelled while the timer was firing.
                _ => return,
            }
        }

        match self.inner.api.update_note(&id, &patch).await {
            Ok(Some(saved)) => {
                let mut state = self.inner.state.lock().await;
                if state.revision(&id) != revision {
                    debug!(id = %id, "note changed since write was scheduled, keeping local state");
                    return;
                }
                if let Some(note) = state.find_mut(&id) {
                    *note = saved;
                }
            }
            Ok(None) => debug!(id = %id, "update confirmed without body"),
            Err(e) => warn!(id = %id, error = %e, "failed to update note"),
        }
    }
}
