//! Models module for the setlist core
//!
//! Plain data: lines, labels, arrangements, annotations and pitch spellings.
//! Groups are not modelled here; they are derived in `structure::groups`.

pub mod core;
pub mod label;
pub mod arrangement;
pub mod annotations;
pub mod pitch;

// Re-export commonly used types
pub use self::core::*;
pub use label::SectionLabel;
pub use arrangement::{Arrangement, ArrangementId, ArrangementRow, EntryId, GroupKey, GroupRef};
pub use annotations::{AnnotationSnapshot, LinkedWord, Note, NoteId, NotePosition, Placement, WordKey};
pub use pitch::{Accidental, Key, NoteLetter, Pitch, PitchPrefix};
