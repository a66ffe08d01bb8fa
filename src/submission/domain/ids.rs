//! Identifier and ordinal types for the submission domain.

use super::SubmissionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an original submission record.
///
/// # Examples
///
/// ```
/// use atelier::submission::domain::SubmissionId;
///
/// let id = SubmissionId::new();
/// assert!(!id.as_ref().is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random submission identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a submission identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for SubmissionId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a revision submission record.
///
/// Revisions carry their own identifier space; frozen snapshots never
/// reference this type (provenance always points at the originating
/// [`SubmissionId`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(Uuid);

impl RevisionId {
    /// Creates a new random revision identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a revision identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RevisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for RevisionId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a frozen snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrozenSubmissionId(Uuid);

impl FrozenSubmissionId {
    /// Creates a new random snapshot identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a snapshot identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for FrozenSubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for FrozenSubmissionId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FrozenSubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal of an original submission attempt, starting at 1.
///
/// Attempt ordinals are monotonically increasing and unique per
/// (task, submitter) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptNumber(u32);

impl AttemptNumber {
    /// Largest ordinal representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u32 = i32::MAX as u32;

    /// Creates a validated attempt ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::InvalidAttemptNumber`] when the
    /// value is zero or exceeds the schema-backed maximum (`i32::MAX`).
    pub const fn new(value: u32) -> Result<Self, SubmissionDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(SubmissionDomainError::InvalidAttemptNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying ordinal value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AttemptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal of a revision submission, starting at 1.
///
/// Revision ordinals form a counter distinct from attempt ordinals and are
/// monotonically increasing per (task, submitter) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionNumber(u32);

impl RevisionNumber {
    /// Largest ordinal representable in the current `PostgreSQL` schema.
    const MAX_PERSISTED_VALUE: u32 = i32::MAX as u32;

    /// Creates a validated revision ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::InvalidRevisionNumber`] when the
    /// value is zero or exceeds the schema-backed maximum (`i32::MAX`).
    pub const fn new(value: u32) -> Result<Self, SubmissionDomainError> {
        if value == 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(SubmissionDomainError::InvalidRevisionNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying ordinal value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the ordinal that follows this one.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::InvalidRevisionNumber`] when the
    /// successor exceeds the schema-backed maximum.
    pub const fn next(self) -> Result<Self, SubmissionDomainError> {
        Self::new(self.0 + 1)
    }
}

impl fmt::Display for RevisionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
