//! Setlist WASM Module
//!
//! Core of a worship-setlist editor: slide groups derived from lyric lines,
//! independently ordered arrangements kept consistent with those groups,
//! chords and notes anchored to words, chord transposition and note marker
//! numbering. The `api` module exposes it all to JavaScript.

pub mod error;
pub mod config;
pub mod models;
pub mod text;
pub mod structure;
pub mod transposition;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use error::{Result, SetlistError};
pub use config::EngineConfig;
pub use models::{
    Arrangement, ArrangementId, Document, EntryId, GroupKey, GroupRef, Key, Line, LineOwnerId,
    LinkedWord, Note, NoteId, NotePosition, Placement, SectionLabel,
};
pub use structure::{Group, RenumberOutcome, WordOrderIndex};
pub use text::{AnnotationStore, WordRange};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger is already installed (module re-initialised)
        log::debug!("console logger already initialized");
    }

    log::info!("Setlist WASM module initialized");
}
