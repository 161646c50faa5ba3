//! User profile model.
//!
//! # Invariants
//! - `name` is trimmed and holds 1..=10 characters.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const USER_NAME_MAX_CHARS: usize = 10;

/// Validation failures for profile input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    NameTooLong { chars: usize },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { chars } => write!(
                f,
                "name must be at most {USER_NAME_MAX_CHARS} characters, got {chars}"
            ),
        }
    }
}

impl Error for UserValidationError {}

/// Singleton profile collected on the entry screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

impl UserProfile {
    /// Builds a validated profile from raw entry-screen input.
    pub fn new(name: &str) -> Result<Self, UserValidationError> {
        let profile = Self {
            name: name.trim().to_string(),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        let chars = self.name.trim().chars().count();
        if chars == 0 {
            return Err(UserValidationError::EmptyName);
        }
        if chars > USER_NAME_MAX_CHARS {
            return Err(UserValidationError::NameTooLong { chars });
        }
        Ok(())
    }
}
