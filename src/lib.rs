pub mod board;
pub mod cli;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod server;
pub mod storage;

pub use board::Board;
pub use client::{HttpNotesApi, NotesApi};
pub use error::{BoardError, Result};
pub use storage::NoteStore;
