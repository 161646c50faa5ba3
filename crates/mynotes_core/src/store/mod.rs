//! Note Store: sole owner of the persisted `notes` and `user` values.
//!
//! # Responsibility
//! - Serialize notes/profile to JSON and persist them by whole-value replace.
//! - Separate soft background reads from strict user-initiated writes.
//! - Notify subscribed views after every successful write.
//!
//! # Invariants
//! - Absent keys read as empty/`None`, never as errors.
//! - A failed write leaves the previously persisted value intact.

use crate::kv::KvError;
use crate::model::user::UserValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod events;
pub mod note_store;

pub use events::{StoreEvent, SubscriptionId};
pub use note_store::NoteStore;

/// Storage key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes";
/// Storage key holding the JSON user profile object.
pub const USER_KEY: &str = "user";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for store use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying key-value storage failed.
    Storage(KvError),
    /// Persisted value could not be decoded, or a value could not be encoded.
    Serialization {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Profile input rejected.
    InvalidUser(UserValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization { key, source } => {
                write!(f, "invalid JSON under key `{key}`: {source}")
            }
            Self::InvalidUser(err) => write!(f, "invalid user profile: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
            Self::InvalidUser(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

impl From<UserValidationError> for StoreError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUser(value)
    }
}

impl StoreError {
    /// Stable machine-readable code for logs and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "storage_failed",
            Self::Serialization { .. } => "malformed_value",
            Self::InvalidUser(_) => "invalid_user",
        }
    }
}
