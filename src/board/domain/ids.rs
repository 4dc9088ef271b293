//! Identifier types for the board domain.
//!
//! Every identifier is assigned by the task store and wraps a positive
//! integer. Zero is rejected so that a defaulted numeric field in a payload
//! can never masquerade as a real record.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`BoardDomainError::InvalidIdentifier`] when the value
            /// is zero.
            pub const fn new(value: u64) -> Result<Self, BoardDomainError> {
                if value == 0 {
                    return Err(BoardDomainError::InvalidIdentifier {
                        kind: $kind,
                        value,
                    });
                }
                Ok(Self(value))
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl TryFrom<u64> for $name {
            type Error = BoardDomainError;

            fn try_from(value: u64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(
    /// Store-assigned task identifier.
    TaskId,
    "task"
);

positive_id!(
    /// Identifier of the project whose tasks populate a board.
    ProjectId,
    "project"
);

positive_id!(
    /// Identifier of a user referenced as task author or assignee.
    UserId,
    "user"
);

impl ProjectId {
    /// Parses a raw project identifier, typically taken from a route segment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidProjectId`] when the value is not a
    /// positive integer.
    pub fn parse(raw: &str) -> Result<Self, BoardDomainError> {
        raw.trim()
            .parse::<u64>()
            .ok()
            .and_then(|value| Self::new(value).ok())
            .ok_or_else(|| BoardDomainError::InvalidProjectId(raw.to_owned()))
    }
}

/// Identifier for a single drag gesture, used to match a store response to
/// the gesture that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureId(Uuid);

impl GestureId {
    /// Creates a new random gesture identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a gesture identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for GestureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
