//! Revision submission record: a resubmission after a revision request.

use super::{
    Review, ReviewVerdict, RevisionId, RevisionNumber, SubmissionDomainError, SubmissionId,
    SubmissionStatus,
};
use crate::task::domain::{StudentId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating a revision submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionDraft {
    original_id: SubmissionId,
    task_id: TaskId,
    submitter: StudentId,
    body: String,
    file_refs: Vec<String>,
}

impl RevisionDraft {
    /// Creates a validated revision draft.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionDomainError::EmptySubmissionBody`] if the body is
    /// empty after trimming.
    pub fn new(
        original_id: SubmissionId,
        task_id: TaskId,
        submitter: StudentId,
        body: impl Into<String>,
    ) -> Result<Self, SubmissionDomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(SubmissionDomainError::EmptySubmissionBody);
        }
        Ok(Self {
            original_id,
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
}

/// One revision attempt following a `revision_requested` outcome on an
/// original submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSubmission {
    id: RevisionId,
    original_id: SubmissionId,
    task_id: TaskId,
    submitter: StudentId,
    body: String,
    file_refs: Vec<String>,
    status: SubmissionStatus,
    revision: RevisionNumber,
    submitted_at: DateTime<Utc>,
    review: Option<Review>,
}

/// Parameter object for reconstructing a persisted revision submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRevisionData {
    /// Persisted revision identifier.
    pub id: RevisionId,
    /// Persisted originating submission reference.
    pub original_id: SubmissionId,
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
    /// Persisted revision ordinal.
    pub revision: RevisionNumber,
    /// Persisted submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Persisted review record, if any.
    pub review: Option<Review>,
}

impl RevisionSubmission {
    /// Creates a new pending revision from a validated draft.
    #[must_use]
    pub fn new(draft: RevisionDraft, revision: RevisionNumber, clock: &impl Clock) -> Self {
        Self {
            id: RevisionId::new(),
            original_id: draft.original_id,
            task_id: draft.task_id,
            submitter: draft.submitter,
            body: draft.body,
            file_refs: draft.file_refs,
            status: SubmissionStatus::Pending,
            revision,
            submitted_at: clock.utc(),
            review: None,
        }
    }

    /// Reconstructs a revision from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRevisionData) -> Self {
        Self {
            id: data.id,
            original_id: data.original_id,
            task_id: data.task_id,
            submitter: data.submitter,
            body: data.body,
            file_refs: data.file_refs,
            status: data.status,
            revision: data.revision,
            submitted_at: data.submitted_at,
            review: data.review,
        }
    }

    /// Returns the revision identifier.
    #[must_use]
    pub const fn id(&self) -> RevisionId {
        self.id
    }

    /// Returns the originating original submission.
    #[must_use]
    pub const fn original_id(&self) -> SubmissionId {
        self.original_id
    }

    /// Returns the task this revision belongs to.
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

    /// Returns the revision ordinal.
    #[must_use]
    pub const fn revision(&self) -> RevisionNumber {
        self.revision
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
    /// Returns [`SubmissionDomainError::RevisionAlreadyReviewed`] unless the
    /// revision is still pending.
    pub fn apply_review(
        &mut self,
        verdict: ReviewVerdict,
        reviewer: StudentId,
        comments: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), SubmissionDomainError> {
        if self.status != SubmissionStatus::Pending {
            return Err(SubmissionDomainError::RevisionAlreadyReviewed(self.id));
        }
        self.status = verdict.status();
        self.review = Some(Review::new(reviewer, comments, clock.utc()));
        Ok(())
    }
}
