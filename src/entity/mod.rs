mod note;

pub use note::{Note, NoteColor, NoteCreate, NotePatch};
