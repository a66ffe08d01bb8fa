//! Review verdicts and the review record attached to submissions.

use super::SubmissionStatus;
use crate::task::domain::StudentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A leader's verdict on a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewVerdict {
    /// Accept the work.
    Approve,
    /// Ask for a revision.
    RequestRevision,
    /// Reject the work.
    Reject,
}

impl ReviewVerdict {
    /// Returns the submission status this verdict maps to.
    #[must_use]
    pub const fn status(self) -> SubmissionStatus {
        match self {
            Self::Approve => SubmissionStatus::Approved,
            Self::RequestRevision => SubmissionStatus::RevisionRequested,
            Self::Reject => SubmissionStatus::Rejected,
        }
    }
}

/// Review record attached to a submission after a leader's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    reviewer: StudentId,
    comments: Option<String>,
    reviewed_at: DateTime<Utc>,
}

impl Review {
    /// Creates a review record.
    #[must_use]
    pub const fn new(
        reviewer: StudentId,
        comments: Option<String>,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reviewer,
            comments,
            reviewed_at,
        }
    }

    /// Returns the reviewing leader.
    #[must_use]
    pub const fn reviewer(&self) -> StudentId {
        self.reviewer
    }

    /// Returns the reviewer's comments, if any.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns the review timestamp.
    #[must_use]
    pub const fn reviewed_at(&self) -> DateTime<Utc> {
        self.reviewed_at
    }
}
