//! `PostgreSQL` store implementation for frozen snapshots.
//!
//! The insert relies on the `idx_frozen_submissions_scope_unique` index for
//! the reject-duplicate policy; an application-level check-then-insert
//! would leave a race window between concurrent freezes of the same key.

use super::{
    SubmissionPgPool,
    models::{FrozenRow, NewFrozenRow},
    schema::frozen_task_submissions,
};
use crate::submission::{
    domain::{
        DisplayStatus, FrozenScopeKey, FrozenSubmission, FrozenSubmissionId, PersistedFrozenData,
        SubmissionId,
    },
    ports::{FrozenStoreError, FrozenStoreResult, FrozenSubmissionStore},
};
use crate::task::domain::{GroupId, PhaseId, StudentId, TaskId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed frozen snapshot store.
#[derive(Debug, Clone)]
pub struct PostgresFrozenSubmissionStore {
    pool: SubmissionPgPool,
}

impl PostgresFrozenSubmissionStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SubmissionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> FrozenStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> FrozenStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(FrozenStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(FrozenStoreError::persistence)?
    }
}

#[async_trait]
impl FrozenSubmissionStore for PostgresFrozenSubmissionStore {
    async fn insert(&self, snapshot: &FrozenSubmission) -> FrozenStoreResult<()> {
        let key = snapshot.scope_key();
        let new_row = to_new_row(snapshot)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(frozen_task_submissions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_scope_unique_violation(info.as_ref()) =>
                    {
                        FrozenStoreError::AlreadyFrozen(key)
                    }
                    _ => FrozenStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_scope(
        &self,
        key: &FrozenScopeKey,
    ) -> FrozenStoreResult<Option<FrozenSubmission>> {
        let lookup = *key;
        self.run_blocking(move |connection| {
            let row = frozen_task_submissions::table
                .filter(frozen_task_submissions::phase_id.eq(lookup.phase_id.into_inner()))
                .filter(frozen_task_submissions::task_id.eq(lookup.task_id.into_inner()))
                .filter(frozen_task_submissions::student.eq(lookup.student.into_inner()))
                .filter(frozen_task_submissions::group_id.eq(lookup.group_id.into_inner()))
                .select(FrozenRow::as_select())
                .first::<FrozenRow>(connection)
                .optional()
                .map_err(FrozenStoreError::persistence)?;
            row.map(row_to_frozen).transpose()
        })
        .await
    }

    async fn list_for_phase_group(
        &self,
        phase_id: PhaseId,
        group_id: GroupId,
    ) -> FrozenStoreResult<Vec<FrozenSubmission>> {
        self.run_blocking(move |connection| {
            let rows = frozen_task_submissions::table
                .filter(frozen_task_submissions::phase_id.eq(phase_id.into_inner()))
                .filter(frozen_task_submissions::group_id.eq(group_id.into_inner()))
                .select(FrozenRow::as_select())
                .load::<FrozenRow>(connection)
                .map_err(FrozenStoreError::persistence)?;
            rows.into_iter().map(row_to_frozen).collect()
        })
        .await
    }
}

fn is_scope_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_frozen_submissions_scope_unique")
}

fn to_new_row(snapshot: &FrozenSubmission) -> FrozenStoreResult<NewFrozenRow> {
    let file_refs: Value =
        serde_json::to_value(snapshot.file_refs()).map_err(FrozenStoreError::persistence)?;

    Ok(NewFrozenRow {
        id: snapshot.id().into_inner(),
        phase_id: snapshot.phase_id().into_inner(),
        group_id: snapshot.group_id().into_inner(),
        task_id: snapshot.task_id().into_inner(),
        student: snapshot.student().into_inner(),
        source_submission_id: snapshot
            .source_submission_id()
            .map(SubmissionId::into_inner),
        task_title: snapshot.task_title().to_owned(),
        task_description: snapshot.task_description().map(str::to_owned),
        body: snapshot.body().to_owned(),
        file_refs,
        display_status: snapshot.display_status().as_str().to_owned(),
        submitted_at: snapshot.submitted_at(),
        frozen_at: snapshot.frozen_at(),
        frozen_by: snapshot.frozen_by().into_inner(),
    })
}

fn row_to_frozen(row: FrozenRow) -> FrozenStoreResult<FrozenSubmission> {
    let FrozenRow {
        id,
        phase_id,
        group_id,
        task_id,
        student,
        source_submission_id,
        task_title,
        task_description,
        body,
        file_refs: persisted_file_refs,
        display_status: persisted_status,
        submitted_at,
        frozen_at,
        frozen_by,
    } = row;

    let file_refs: Vec<String> =
        serde_json::from_value(persisted_file_refs).map_err(FrozenStoreError::persistence)?;
    let display_status = DisplayStatus::try_from(persisted_status.as_str())
        .map_err(FrozenStoreError::persistence)?;

    let data = PersistedFrozenData {
        id: FrozenSubmissionId::from_uuid(id),
        phase_id: PhaseId::from_uuid(phase_id),
        group_id: GroupId::from_uuid(group_id),
        task_id: TaskId::from_uuid(task_id),
        student: StudentId::from_uuid(student),
        source_submission_id: source_submission_id.map(SubmissionId::from_uuid),
        task_title,
        task_description,
        body,
        file_refs,
        display_status,
        submitted_at,
        frozen_at,
        frozen_by: StudentId::from_uuid(frozen_by),
    };
    Ok(FrozenSubmission::from_persisted(data))
}
