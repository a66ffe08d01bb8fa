//! Store port for frozen snapshots.

use crate::submission::domain::{FrozenScopeKey, FrozenSubmission};
use crate::task::domain::{GroupId, PhaseId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for frozen store operations.
pub type FrozenStoreResult<T> = Result<T, FrozenStoreError>;

/// Persistence contract for frozen snapshots.
///
/// This engine is the table's sole writer; the only contended case is two
/// freeze invocations racing on the same scope key, which the insert
/// contract resolves in the datastore.
#[async_trait]
pub trait FrozenSubmissionStore: Send + Sync {
    /// Inserts a snapshot under the reject-duplicate policy.
    ///
    /// The implementation must rely on a datastore-level uniqueness guard
    /// for the scope key (not an application-level check-then-insert) so
    /// concurrent freezes of the same key cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`FrozenStoreError::AlreadyFrozen`] when a snapshot for the
    /// same scope key exists.
    async fn insert(&self, snapshot: &FrozenSubmission) -> FrozenStoreResult<()>;

    /// Finds a snapshot by scope key.
    ///
    /// Returns `None` when no snapshot exists for the key.
    async fn find_by_scope(
        &self,
        key: &FrozenScopeKey,
    ) -> FrozenStoreResult<Option<FrozenSubmission>>;

    /// Returns all snapshots captured for a phase/group pair.
    async fn list_for_phase_group(
        &self,
        phase_id: PhaseId,
        group_id: GroupId,
    ) -> FrozenStoreResult<Vec<FrozenSubmission>>;
}

/// Errors returned by frozen store implementations.
#[derive(Debug, Clone, Error)]
pub enum FrozenStoreError {
    /// A snapshot already exists for the scope key.
    #[error("snapshot already frozen for {0}")]
    AlreadyFrozen(FrozenScopeKey),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FrozenStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
