//! In-memory store for original and revision submissions.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::submission::{
    domain::{OriginalSubmission, RevisionId, RevisionSubmission, SubmissionId},
    ports::{SubmissionStore, SubmissionStoreError, SubmissionStoreResult},
};
use crate::task::domain::{StudentId, TaskId};

/// Thread-safe in-memory submission store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionStore {
    state: Arc<RwLock<InMemorySubmissionState>>,
}

#[derive(Debug, Default)]
struct InMemorySubmissionState {
    originals: HashMap<SubmissionId, OriginalSubmission>,
    revisions: HashMap<RevisionId, RevisionSubmission>,
}

impl InMemorySubmissionStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> SubmissionStoreError {
    SubmissionStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn store_original(&self, submission: &OriginalSubmission) -> SubmissionStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let duplicate_key = state.originals.values().any(|existing| {
            existing.task_id() == submission.task_id()
                && existing.submitter() == submission.submitter()
                && existing.attempt() == submission.attempt()
        });
        if duplicate_key || state.originals.contains_key(&submission.id()) {
            return Err(SubmissionStoreError::DuplicateSubmission(submission.id()));
        }
        state.originals.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn store_revision(&self, revision: &RevisionSubmission) -> SubmissionStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let duplicate_key = state.revisions.values().any(|existing| {
            existing.task_id() == revision.task_id()
                && existing.submitter() == revision.submitter()
                && existing.revision() == revision.revision()
        });
        if duplicate_key || state.revisions.contains_key(&revision.id()) {
            return Err(SubmissionStoreError::DuplicateRevision(revision.id()));
        }
        state.revisions.insert(revision.id(), revision.clone());
        Ok(())
    }

    async fn update_original(&self, submission: &OriginalSubmission) -> SubmissionStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.originals.contains_key(&submission.id()) {
            return Err(SubmissionStoreError::OriginalNotFound(submission.id()));
        }
        state.originals.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn update_revision(&self, revision: &RevisionSubmission) -> SubmissionStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.revisions.contains_key(&revision.id()) {
            return Err(SubmissionStoreError::RevisionNotFound(revision.id()));
        }
        state.revisions.insert(revision.id(), revision.clone());
        Ok(())
    }

    async fn find_original(
        &self,
        id: SubmissionId,
    ) -> SubmissionStoreResult<Option<OriginalSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.originals.get(&id).cloned())
    }

    async fn find_revision(
        &self,
        id: RevisionId,
    ) -> SubmissionStoreResult<Option<RevisionSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.revisions.get(&id).cloned())
    }

    async fn originals_for_task(
        &self,
        task_id: TaskId,
        submitter: StudentId,
    ) -> SubmissionStoreResult<Vec<OriginalSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut rows: Vec<OriginalSubmission> = state
            .originals
            .values()
            .filter(|row| row.task_id() == task_id && row.submitter() == submitter)
            .cloned()
            .collect();
        // Newest-first with the ordinal as tie-break, matching the SQL
        // adapter's ORDER BY.
        rows.sort_by_key(|row| Reverse((row.submitted_at(), row.attempt())));
        Ok(rows)
    }

    async fn revisions_for_task(
        &self,
        task_id: TaskId,
        submitter: StudentId,
    ) -> SubmissionStoreResult<Vec<RevisionSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut rows: Vec<RevisionSubmission> = state
            .revisions
            .values()
            .filter(|row| row.task_id() == task_id && row.submitter() == submitter)
            .cloned()
            .collect();
        rows.sort_by_key(|row| Reverse((row.submitted_at(), row.revision())));
        Ok(rows)
    }
}
