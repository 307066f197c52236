//! Structure layer: groups, arrangements and reading order
//!
//! Groups are derived from lines on demand and never stored. Arrangements
//! are stored orders over those groups, repaired by explicit reconciliation
//! after every change that can move the canonical group list.
//!
//! ## Modules
//!
//! - `groups`: group derivation from lines
//! - `arrangement`: reconcile, insert, move and remove on one arrangement
//! - `markers`: word order index and note marker renumbering
//! - `document`: the same operations applied atomically to a `Document`

pub mod groups;
pub mod arrangement;
pub mod markers;
pub mod document;

pub use groups::{canonical_keys, derive_groups, Group};
pub use arrangement::{insert_group_at, move_entry, reconcile, reconcile_groups, remove_entry};
pub use markers::{build_word_order_index, renumber, RenumberOutcome, WordOrderIndex};
