//! Editing session state for Trellis.
//!
//! A [`Session`] owns the documents being edited (layout, model lists and
//! database settings) and persists them through a [`Storage`] backend.
//! Writes are debounced: edits mark the session dirty and a later
//! [`Session::tick`] flushes once edits have been quiet for the
//! [`FlushPolicy`] window.

pub mod error;
pub mod session;
pub mod storage;

pub use error::{Result, StorageError};
pub use session::{
    FlushPolicy, Selection, Session, DATABASE_SETTINGS_KEY, DJANGO_MODELS_KEY,
    EXPRESS_MODELS_KEY, LAYOUT_KEY,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
