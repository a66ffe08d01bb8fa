//! Store port for original and revision submission rows.

use crate::submission::domain::{OriginalSubmission, RevisionId, RevisionSubmission, SubmissionId};
use crate::task::domain::{StudentId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for submission store operations.
pub type SubmissionStoreResult<T> = Result<T, SubmissionStoreError>;

/// Persistence contract for submission rows.
///
/// The `*_for_task` read methods are the resolution engine's input contract:
/// rows come back newest-first (submission timestamp descending, ordinal
/// descending as the tie-break for rows created in the same transaction).
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Stores a new original submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionStoreError::DuplicateSubmission`] when the id or
    /// the (task, submitter, attempt) key already exists.
    async fn store_original(&self, submission: &OriginalSubmission) -> SubmissionStoreResult<()>;

    /// Stores a new revision submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionStoreError::DuplicateRevision`] when the id or
    /// the (task, submitter, revision) key already exists.
    async fn store_revision(&self, revision: &RevisionSubmission) -> SubmissionStoreResult<()>;

    /// Persists review changes to an existing original submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionStoreError::OriginalNotFound`] when the row does
    /// not exist.
    async fn update_original(&self, submission: &OriginalSubmission) -> SubmissionStoreResult<()>;

    /// Persists review changes to an existing revision submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionStoreError::RevisionNotFound`] when the row does
    /// not exist.
    async fn update_revision(&self, revision: &RevisionSubmission) -> SubmissionStoreResult<()>;

    /// Finds an original submission by identifier.
    ///
    /// Returns `None` when the row does not exist.
    async fn find_original(
        &self,
        id: SubmissionId,
    ) -> SubmissionStoreResult<Option<OriginalSubmission>>;

    /// Finds a revision submission by identifier.
    ///
    /// Returns `None` when the row does not exist.
    async fn find_revision(
        &self,
        id: RevisionId,
    ) -> SubmissionStoreResult<Option<RevisionSubmission>>;

    /// Returns all original submissions for a task/student pair,
    /// newest-first.
    async fn originals_for_task(
        &self,
        task_id: TaskId,
        submitter: StudentId,
    ) -> SubmissionStoreResult<Vec<OriginalSubmission>>;

    /// Returns all revision submissions for a task/student pair,
    /// newest-first.
    async fn revisions_for_task(
        &self,
        task_id: TaskId,
        submitter: StudentId,
    ) -> SubmissionStoreResult<Vec<RevisionSubmission>>;
}

/// Errors returned by submission store implementations.
#[derive(Debug, Clone, Error)]
pub enum SubmissionStoreError {
    /// An original submission with the same identity already exists.
    #[error("duplicate original submission: {0}")]
    DuplicateSubmission(SubmissionId),

    /// A revision submission with the same identity already exists.
    #[error("duplicate revision submission: {0}")]
    DuplicateRevision(RevisionId),

    /// The original submission was not found.
    #[error("original submission not found: {0}")]
    OriginalNotFound(SubmissionId),

    /// The revision submission was not found.
    #[error("revision submission not found: {0}")]
    RevisionNotFound(RevisionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
