//! Domain model for persisted notes and the user profile.
//!
//! # Responsibility
//! - Define the records stored under the `notes` and `user` keys.
//! - Keep priority a closed set so every consumer matches exhaustively.
//!
//! # Invariants
//! - A `Note` id never changes after creation.
//! - A persisted `UserProfile` name is 1..=10 characters.

pub mod note;
pub mod user;
