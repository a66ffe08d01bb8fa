//! Error types for submission domain validation.

use super::{RevisionId, SubmissionId};
use thiserror::Error;

/// Errors returned while constructing or mutating submission domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionDomainError {
    /// The submission body is empty after trimming.
    #[error("submission body must not be empty")]
    EmptySubmissionBody,

    /// The attempt ordinal is invalid.
    #[error("invalid attempt ordinal {0}, expected a positive integer")]
    InvalidAttemptNumber(u32),

    /// The revision ordinal is invalid.
    #[error("invalid revision ordinal {0}, expected a positive integer")]
    InvalidRevisionNumber(u32),

    /// The submission already carries a review verdict.
    #[error("submission {0} has already been reviewed")]
    AlreadyReviewed(SubmissionId),

    /// The revision already carries a review verdict.
    #[error("revision {0} has already been reviewed")]
    RevisionAlreadyReviewed(RevisionId),

    /// A revision was submitted against an original whose status does not
    /// ask for one.
    #[error("submission {0} has no outstanding revision request")]
    RevisionNotRequested(SubmissionId),
}

/// Error returned while parsing submission statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown submission status: {0}")]
pub struct ParseSubmissionStatusError(pub String);
