pub mod chord_symbol;
pub mod spelling;
pub mod transpose;

pub use chord_symbol::{ChordSymbol, DEFAULT_NO_CHORD_MARKERS};
pub use spelling::{spell, SpellingPreference};
pub use transpose::{semitones_between, transpose, transpose_symbol, transpose_with_markers};
