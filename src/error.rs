//! Error types for setlist operations
//!
//! Every public operation either applies fully or returns one of these and
//! leaves the document exactly as it was. None of them is fatal: the caller
//! decides whether to surface, retry or ignore.

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SetlistError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetlistError {
    /// Attempted to reorder a locked arrangement. Its order always mirrors
    /// canonical group order and is rebuilt only by reconciliation.
    #[error("Arrangement '{arrangement_id}' is locked")]
    LockedArrangement { arrangement_id: String },

    /// A referenced identity (line, row, entry, group, note...) is absent.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// An identity that must be unique (line id) is already taken.
    #[error("{kind} '{id}' already exists")]
    Duplicate { kind: &'static str, id: String },

    /// Key string outside the twelve pitch classes.
    ///
    /// ```
    /// # use setlist_wasm::SetlistError;
    /// let err = SetlistError::UnrecognizedKey("H".to_string());
    /// assert_eq!(err.to_string(), "Unrecognized key: 'H'");
    /// ```
    #[error("Unrecognized key: '{0}'")]
    UnrecognizedKey(String),

    /// Chord symbol that has no recognizable root.
    #[error("Malformed chord symbol: '{0}'")]
    MalformedChordSymbol(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Persisted JSON/YAML that does not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SetlistError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        SetlistError::NotFound { kind, id: id.into() }
    }

    pub fn locked(arrangement_id: impl Into<String>) -> Self {
        SetlistError::LockedArrangement {
            arrangement_id: arrangement_id.into(),
        }
    }
}
