//! Text layer: words and the annotations anchored to them
//!
//! Knows nothing about groups or arrangements. Everything here addresses text
//! as `(line, row, column)` with columns counted in characters.
//!
//! ## Modules
//!
//! - `tokenizer`: word ranges per row, cached per row text
//! - `annotations`: chord placements and notes, word-scoped replace, edit tracking

pub mod tokenizer;
pub mod annotations;

pub use tokenizer::{tokenize, word_at, Tokenizer, WordRange};
pub use annotations::{AnnotationStore, RowSource};
