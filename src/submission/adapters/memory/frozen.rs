//! In-memory store for frozen snapshots.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::submission::{
    domain::{FrozenScopeKey, FrozenSubmission},
    ports::{FrozenStoreError, FrozenStoreResult, FrozenSubmissionStore},
};
use crate::task::domain::{GroupId, PhaseId};

/// Thread-safe in-memory frozen snapshot store.
///
/// The scope key doubles as the map key, so the uniqueness guard holds
/// under the write lock exactly as the SQL unique index does in the
/// `PostgreSQL` adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrozenSubmissionStore {
    state: Arc<RwLock<HashMap<FrozenScopeKey, FrozenSubmission>>>,
}

impl InMemoryFrozenSubmissionStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> FrozenStoreError {
    FrozenStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl FrozenSubmissionStore for InMemoryFrozenSubmissionStore {
    async fn insert(&self, snapshot: &FrozenSubmission) -> FrozenStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let key = snapshot.scope_key();
        if state.contains_key(&key) {
            return Err(FrozenStoreError::AlreadyFrozen(key));
        }
        state.insert(key, snapshot.clone());
        Ok(())
    }

    async fn find_by_scope(
        &self,
        key: &FrozenScopeKey,
    ) -> FrozenStoreResult<Option<FrozenSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(key).cloned())
    }

    async fn list_for_phase_group(
        &self,
        phase_id: PhaseId,
        group_id: GroupId,
    ) -> FrozenStoreResult<Vec<FrozenSubmission>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|snapshot| {
                snapshot.phase_id() == phase_id && snapshot.group_id() == group_id
            })
            .cloned()
            .collect())
    }
}
