//! Setlist WASM API
//!
//! JavaScript-facing bindings. Every call locks the stored document, runs
//! one core operation and hands back a serialized result; the core
//! operations are all-or-nothing, so a rejected call leaves the document
//! as it was.
//!
//! # Module Structure
//!
//! - `helpers`: console logging, serde conversion, document storage
//! - `types`: result shapes returned to JavaScript
//! - `core`: document loading, configuration, lines and text edits, transposition
//! - `arrangements`: arrangement add/remove and entry insert/move/remove
//! - `annotations`: chords, notes and marker renumbering
//! - `export`: persistence rows, annotation snapshots, slide text, chord charts

pub mod helpers;
pub mod types;
pub mod core;
pub mod arrangements;
pub mod annotations;
pub mod export;

pub use self::core::*;
pub use arrangements::*;
pub use annotations::*;
pub use export::*;
