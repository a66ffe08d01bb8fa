//! Closed status vocabularies for submission records and resolved views.

use super::ParseSubmissionStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a stored submission row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting a leader's review.
    Pending,
    /// Accepted by the leader.
    Approved,
    /// The leader asked for a revision.
    RevisionRequested,
    /// Rejected outright.
    Rejected,
}

impl SubmissionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::RevisionRequested => "revision_requested",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for SubmissionStatus {
    type Error = ParseSubmissionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "revision_requested" => Ok(Self::RevisionRequested),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseSubmissionStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status shown for a resolved submission view or a frozen snapshot.
///
/// Extends the row vocabulary with `NoSubmission` for tasks that were
/// assigned but never worked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    /// Awaiting a leader's review.
    Pending,
    /// Accepted by the leader.
    Approved,
    /// The leader asked for a revision.
    RevisionRequested,
    /// Rejected outright.
    Rejected,
    /// No submission row exists for the task.
    NoSubmission,
}

impl DisplayStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::RevisionRequested => "revision_requested",
            Self::Rejected => "rejected",
            Self::NoSubmission => "no_submission",
        }
    }
}

impl From<SubmissionStatus> for DisplayStatus {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Pending => Self::Pending,
            SubmissionStatus::Approved => Self::Approved,
            SubmissionStatus::RevisionRequested => Self::RevisionRequested,
            SubmissionStatus::Rejected => Self::Rejected,
        }
    }
}

impl TryFrom<&str> for DisplayStatus {
    type Error = ParseSubmissionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized == "no_submission" {
            return Ok(Self::NoSubmission);
        }
        SubmissionStatus::try_from(value).map(Self::from)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
