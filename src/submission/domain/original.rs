//! Original submission record: a direct attempt at completing a task.

use super::{
    AttemptNumber, Review, ReviewVerdict, SubmissionDomainError, SubmissionId, SubmissionStatus,
};
use crate::task::domain::{StudentId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input shared by original submission constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    task_id: TaskId,
    submitter: StudentId,
    body: String,
    file_refs: Vec<String>,
}

impl SubmissionDraft {
    /// Creates a validated submission draft.
    ///
    /// File references are opaque strings pointing into an external blob
    /// store; this domain never interprets them.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::EmptySubmissionBody`] if the body is
    /// empty after trimming.
    pub fn new(
        task_id: TaskId,
        submitter: StudentId,
        body: impl Into<String>,
    ) -> Result<Self, SubmissionDomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(SubmissionDomainError::EmptySubmissionBody);
        }
        Ok(Self {
            task_id,
            submitter,
            body,
            file_refs: Vec::new(),
        })
    }

    /// Attaches file references.
    #[must_use]
    pub fn with_file_refs(mut self, file_refs: impl IntoIterator<Item = String>) -> Self {
        self.file_refs = file_refs.into_iter().collect();
        self
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting student.
    #[must_use]
    pub const fn submitter(&self) -> StudentId {
        self.submitter
    }
}

/// One attempt at completing a task directly, prior to any revision cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalSubmission {
    id: SubmissionId,
    task_id: TaskId,
    submitter: StudentId,
    body: String,
    file_refs: Vec<String>,
    status: SubmissionStatus,
    attempt: AttemptNumber,
    submitted_at: DateTime<Utc>,
    review: Option<Review>,
}

/// Parameter object for reconstructing a persisted original submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOriginalData {
    /// Persisted submission identifier.
    pub id: SubmissionId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted submitter.
    pub submitter: StudentId,
    /// Persisted free-text body.
    pub body: String,
    /// Persisted file references.
    pub file_refs: Vec<String>,
    /// Persisted review status.
    pub status: SubmissionStatus,
    /// Persisted attempt ordinal.
    pub attempt: AttemptNumber,
    /// Persisted submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Persisted review record, if any.
    pub review: Option<Review>,
}

impl OriginalSubmission {
    /// Creates a new pending submission from a validated draft.
    #[must_use]
    pub fn new(draft: SubmissionDraft, attempt: AttemptNumber, clock: &impl Clock) -> Self {
        Self {
            id: SubmissionId::new(),
            task_id: draft.task_id,
            submitter: draft.submitter,
            body: draft.body,
            file_refs: draft.file_refs,
            status: SubmissionStatus::Pending,
            attempt,
            submitted_at: clock.utc(),
            review: None,
        }
    }

    /// Reconstructs a submission from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOriginalData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            submitter: data.submitter,
            body: data.body,
            file_refs: data.file_refs,
            status: data.status,
            attempt: data.attempt,
            submitted_at: data.submitted_at,
            review: data.review,
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the task this submission belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting student.
    #[must_use]
    pub const fn submitter(&self) -> StudentId {
        self.submitter
    }

    /// Returns the free-text body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the attached file references.
    #[must_use]
    pub fn file_refs(&self) -> &[String] {
        &self.file_refs
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Returns the attempt ordinal.
    #[must_use]
    pub const fn attempt(&self) -> AttemptNumber {
        self.attempt
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Returns the review record, if any.
    #[must_use]
    pub const fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    /// Records a leader's verdict.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::AlreadyReviewed`] unless the
    /// submission is still pending.
    pub fn apply_review(
        &mut self,
        verdict: ReviewVerdict,
        reviewer: StudentId,
        comments: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), SubmissionDomainError> {
        if self.status != SubmissionStatus::Pending {
            return Err(SubmissionDomainError::AlreadyReviewed(self.id));
        }
        self.status = verdict.status();
        self.review = Some(Review::new(reviewer, comments, clock.utc()));
        Ok(())
    }
}
