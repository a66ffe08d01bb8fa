//! Service layer for submission intake and leader review.
//!
//! Intake owns ordinal assignment: attempt ordinals come from the task's
//! attempt counter, revision ordinals from the newest stored revision.
//! Review verdicts are recorded on the submission row and mirrored onto the
//! owning task's lifecycle status.

use crate::submission::{
    domain::{
        AttemptNumber, OriginalSubmission, ReviewVerdict, RevisionDraft, RevisionId,
        RevisionNumber, RevisionSubmission, SubmissionDomainError, SubmissionDraft, SubmissionId,
        SubmissionStatus,
    },
    ports::{SubmissionStore, SubmissionStoreError},
};
use crate::task::{
    domain::{StudentId, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for submitting an original attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOriginalRequest {
    task_id: TaskId,
    submitter: StudentId,
    body: String,
    file_refs: Vec<String>,
}

impl SubmitOriginalRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(task_id: TaskId, submitter: StudentId, body: impl Into<String>) -> Self {
        Self {
            task_id,
            submitter,
            body: body.into(),
            file_refs: Vec::new(),
        }
    }

    /// Attaches file references.
    #[must_use]
    pub fn with_file_refs(mut self, file_refs: impl IntoIterator<Item = String>) -> Self {
        self.file_refs = file_refs.into_iter().collect();
        self
    }
}

/// Request payload for submitting a revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRevisionRequest {
    original_id: SubmissionId,
    submitter: StudentId,
    body: String,
    file_refs: Vec<String>,
}

impl SubmitRevisionRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(original_id: SubmissionId, submitter: StudentId, body: impl Into<String>) -> Self {
        Self {
            original_id,
            submitter,
            body: body.into(),
            file_refs: Vec::new(),
        }
    }

    /// Attaches file references.
    #[must_use]
    pub fn with_file_refs(mut self, file_refs: impl IntoIterator<Item = String>) -> Self {
        self.file_refs = file_refs.into_iter().collect();
        self
    }
}

/// Request payload for recording a leader's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    reviewer: StudentId,
    verdict: ReviewVerdict,
    comments: Option<String>,
}

impl ReviewRequest {
    /// Creates a review request.
    #[must_use]
    pub const fn new(reviewer: StudentId, verdict: ReviewVerdict) -> Self {
        Self {
            reviewer,
            verdict,
            comments: None,
        }
    }

    /// Attaches reviewer comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// Service-level errors for intake and review operations.
#[derive(Debug, Error)]
pub enum SubmissionIntakeError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced original submission does not exist.
    #[error("original submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    /// The referenced revision submission does not exist.
    #[error("revision submission not found: {0}")]
    RevisionNotFound(RevisionId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SubmissionDomainError),

    /// Task lifecycle validation failed.
    #[error(transparent)]
    TaskDomain(#[from] TaskDomainError),

    /// Submission store operation failed.
    #[error(transparent)]
    Store(#[from] SubmissionStoreError),

    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for intake service operations.
pub type SubmissionIntakeResult<T> = Result<T, SubmissionIntakeError>;

/// Submission intake and review orchestration service.
#[derive(Clone)]
pub struct SubmissionIntakeService<S, T, C>
where
    S: SubmissionStore,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    submissions: Arc<S>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<S, T, C> SubmissionIntakeService<S, T, C>
where
    S: SubmissionStore,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new intake service.
    #[must_use]
    pub const fn new(submissions: Arc<S>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            submissions,
            tasks,
            clock,
        }
    }

    /// Submits an original attempt at a task.
    ///
    /// Consumes one attempt from the task's budget, assigns the attempt
    /// ordinal, stores the row, and moves the task to `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionIntakeError::TaskNotFound`] for unknown tasks,
    /// [`SubmissionIntakeError::TaskDomain`] when the submitter is not the
    /// assignee or the task rejects the attempt, and store/domain errors
    /// otherwise.
    pub async fn submit_original(
        &self,
        request: SubmitOriginalRequest,
    ) -> SubmissionIntakeResult<OriginalSubmission> {
        let mut task = self.load_task(request.task_id).await?;
        ensure_assignee(&task, request.submitter)?;

        let draft = SubmissionDraft::new(request.task_id, request.submitter, request.body)?
            .with_file_refs(request.file_refs);
        let ordinal = task.record_attempt(&*self.clock)?;
        let attempt = AttemptNumber::new(ordinal)?;
        let submission = OriginalSubmission::new(draft, attempt, &*self.clock);

        self.submissions.store_original(&submission).await?;
        self.tasks.update(&task).await?;
        Ok(submission)
    }

    /// Submits a revision against an original whose review asked for one.
    ///
    /// Assigns the next revision ordinal from the newest stored revision,
    /// stores the row, and moves the task back to `Submitted`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionIntakeError::SubmissionNotFound`] for unknown
    /// originals, [`SubmissionIntakeError::Domain`] with
    /// [`SubmissionDomainError::RevisionNotRequested`] when the original's
    /// status does not ask for a revision, and store/task errors otherwise.
    pub async fn submit_revision(
        &self,
        request: SubmitRevisionRequest,
    ) -> SubmissionIntakeResult<RevisionSubmission> {
        let original = self
            .submissions
            .find_original(request.original_id)
            .await?
            .ok_or(SubmissionIntakeError::SubmissionNotFound(
                request.original_id,
            ))?;
        if original.status() != SubmissionStatus::RevisionRequested {
            return Err(SubmissionDomainError::RevisionNotRequested(original.id()).into());
        }

        let mut task = self.load_task(original.task_id()).await?;
        ensure_assignee(&task, request.submitter)?;

        let draft = RevisionDraft::new(
            request.original_id,
            original.task_id(),
            request.submitter,
            request.body,
        )?
        .with_file_refs(request.file_refs);

        let existing = self
            .submissions
            .revisions_for_task(original.task_id(), request.submitter)
            .await?;
        let ordinal = existing
            .first()
            .map_or(RevisionNumber::new(1), |newest| newest.revision().next())?;

        let revision = RevisionSubmission::new(draft, ordinal, &*self.clock);
        task.record_revision(&*self.clock)?;

        self.submissions.store_revision(&revision).await?;
        self.tasks.update(&task).await?;
        Ok(revision)
    }

    /// Records a leader's verdict on an original submission.
    ///
    /// The verdict is mirrored onto the task: approval completes it, a
    /// revision request moves it to `ToRevise`, and a rejection leaves it
    /// `Submitted` so the attempt budget governs retries.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionIntakeError::SubmissionNotFound`] for unknown
    /// rows, and domain/store errors otherwise.
    pub async fn review_original(
        &self,
        id: SubmissionId,
        request: ReviewRequest,
    ) -> SubmissionIntakeResult<OriginalSubmission> {
        let mut submission = self
            .submissions
            .find_original(id)
            .await?
            .ok_or(SubmissionIntakeError::SubmissionNotFound(id))?;
        submission.apply_review(
            request.verdict,
            request.reviewer,
            request.comments,
            &*self.clock,
        )?;
        self.submissions.update_original(&submission).await?;
        self.apply_verdict_to_task(submission.task_id(), request.verdict)
            .await?;
        Ok(submission)
    }

    /// Records a leader's verdict on a revision submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionIntakeError::RevisionNotFound`] for unknown rows,
    /// and domain/store errors otherwise.
    pub async fn review_revision(
        &self,
        id: RevisionId,
        request: ReviewRequest,
    ) -> SubmissionIntakeResult<RevisionSubmission> {
        let mut revision = self
            .submissions
            .find_revision(id)
            .await?
            .ok_or(SubmissionIntakeError::RevisionNotFound(id))?;
        revision.apply_review(
            request.verdict,
            request.reviewer,
            request.comments,
            &*self.clock,
        )?;
        self.submissions.update_revision(&revision).await?;
        self.apply_verdict_to_task(revision.task_id(), request.verdict)
            .await?;
        Ok(revision)
    }

    async fn load_task(&self, id: TaskId) -> SubmissionIntakeResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(SubmissionIntakeError::TaskNotFound(id))
    }

    async fn apply_verdict_to_task(
        &self,
        task_id: TaskId,
        verdict: ReviewVerdict,
    ) -> SubmissionIntakeResult<()> {
        let target = match verdict {
            ReviewVerdict::Approve => TaskStatus::Completed,
            ReviewVerdict::RequestRevision => TaskStatus::ToRevise,
            ReviewVerdict::Reject => return Ok(()),
        };
        let mut task = self.load_task(task_id).await?;
        task.transition_to(target, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(())
    }
}

fn ensure_assignee(task: &Task, student: StudentId) -> Result<(), TaskDomainError> {
    if task.assignee() != student {
        return Err(TaskDomainError::NotAssignee {
            task_id: task.id(),
            student,
        });
    }
    Ok(())
}
