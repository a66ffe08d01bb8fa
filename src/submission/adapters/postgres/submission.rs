//! `PostgreSQL` store implementation for original and revision submissions.

use super::{
    SubmissionPgPool,
    models::{NewOriginalRow, NewRevisionRow, OriginalRow, RevisionRow},
    schema::{revision_submissions, task_submissions},
};
use crate::submission::{
    domain::{
        AttemptNumber, OriginalSubmission, PersistedOriginalData, PersistedRevisionData, Review,
        RevisionId, RevisionNumber, RevisionSubmission, SubmissionId, SubmissionStatus,
    },
    ports::{SubmissionStore, SubmissionStoreError, SubmissionStoreResult},
};
use crate::task::domain::{StudentId, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed submission store.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionStore {
    pool: SubmissionPgPool,
}

impl PostgresSubmissionStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SubmissionPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SubmissionStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SubmissionStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SubmissionStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SubmissionStoreError::persistence)?
    }
}

#[async_trait]
impl SubmissionStore for PostgresSubmissionStore {
    async fn store_original(&self, submission: &OriginalSubmission) -> SubmissionStoreResult<()> {
        let submission_id = submission.id();
        let new_row = original_to_new_row(submission)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(task_submissions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SubmissionStoreError::DuplicateSubmission(submission_id)
                    }
                    _ => SubmissionStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn store_revision(&self, revision: &RevisionSubmission) -> SubmissionStoreResult<()> {
        let revision_id = revision.id();
        let new_row = revision_to_new_row(revision)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(revision_submissions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SubmissionStoreError::DuplicateRevision(revision_id)
                    }
                    _ => SubmissionStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_original(&self, submission: &OriginalSubmission) -> SubmissionStoreResult<()> {
        let submission_id = submission.id();
        let status = submission.status().as_str().to_owned();
        let (review_comments, reviewed_by, reviewed_at) = review_columns(submission.review());

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(task_submissions::table.find(submission_id.into_inner()))
                    .set((
                        task_submissions::status.eq(status),
                        task_submissions::review_comments.eq(review_comments),
                        task_submissions::reviewed_by.eq(reviewed_by),
                        task_submissions::reviewed_at.eq(reviewed_at),
                    ))
                    .execute(connection)
                    .map_err(SubmissionStoreError::persistence)?;
            if affected == 0 {
                return Err(SubmissionStoreError::OriginalNotFound(submission_id));
            }
            Ok(())
        })
        .await
    }

    async fn update_revision(&self, revision: &RevisionSubmission) -> SubmissionStoreResult<()> {
        let revision_id = revision.id();
        let status = revision.status().as_str().to_owned();
        let (review_comments, reviewed_by, reviewed_at) = review_columns(revision.review());

        self.run_blocking(move |connection| {
            let affected =
                diesel::update(revision_submissions::table.find(revision_id.into_inner()))
                    .set((
                        revision_submissions::status.eq(status),
                        revision_submissions::review_comments.eq(review_comments),
                        revision_submissions::reviewed_by.eq(reviewed_by),
                        revision_submissions::reviewed_at.eq(reviewed_at),
                    ))
                    .execute(connection)
                    .map_err(SubmissionStoreError::persistence)?;
            if affected == 0 {
                return Err(SubmissionStoreError::RevisionNotFound(revision_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_original(
        &self,
        id: SubmissionId,
    ) -> SubmissionStoreResult<Option<OriginalSubmission>> {
        self.run_blocking(move |connection| {
            let row = task_submissions::table
                .find(id.into_inner())
                .select(OriginalRow::as_select())
                .first::<OriginalRow>(connection)
                .optional()
                .map_err(SubmissionStoreError::persistence)?;
            row.map(row_to_original).transpose()
        })
        .await
    }

    async fn find_revision(
        &self,
        id: RevisionId,
    ) -> SubmissionStoreResult<Option<RevisionSubmission>> {
        self.run_blocking(move |connection| {
            let row = revision_submissions::table
                .find(id.into_inner())
                .select(RevisionRow::as_select())
                .first::<RevisionRow>(connection)
                .optional()
                .map_err(SubmissionStoreError::persistence)?;
            row.map(row_to_revision).transpose()
        })
        .await
    }

    async fn originals_for_task(
        &self,
        task_id: TaskId,
        submitter: StudentId,
    ) -> SubmissionStoreResult<Vec<OriginalSubmission>> {
        self.run_blocking(move |connection| {
            let rows = task_submissions::table
                .filter(task_submissions::task_id.eq(task_id.into_inner()))
                .filter(task_submissions::submitter.eq(submitter.into_inner()))
                .order((
                    task_submissions::submitted_at.desc(),
                    task_submissions::attempt.desc(),
                ))
                .select(OriginalRow::as_select())
                .load::<OriginalRow>(connection)
                .map_err(SubmissionStoreError::persistence)?;
            rows.into_iter().map(row_to_original).collect()
        })
        .await
    }

    async fn revisions_for_task(
        &self,
        task_id: TaskId,
        submitter: StudentId,
    ) -> SubmissionStoreResult<Vec<RevisionSubmission>> {
        self.run_blocking(move |connection| {
            let rows = revision_submissions::table
                .filter(revision_submissions::task_id.eq(task_id.into_inner()))
                .filter(revision_submissions::submitter.eq(submitter.into_inner()))
                .order((
                    revision_submissions::submitted_at.desc(),
                    revision_submissions::revision.desc(),
                ))
                .select(RevisionRow::as_select())
                .load::<RevisionRow>(connection)
                .map_err(SubmissionStoreError::persistence)?;
            rows.into_iter().map(row_to_revision).collect()
        })
        .await
    }
}

fn file_refs_to_value(file_refs: &[String]) -> SubmissionStoreResult<Value> {
    serde_json::to_value(file_refs).map_err(SubmissionStoreError::persistence)
}

fn value_to_file_refs(value: Value) -> SubmissionStoreResult<Vec<String>> {
    serde_json::from_value(value).map_err(SubmissionStoreError::persistence)
}

type ReviewColumns = (
    Option<String>,
    Option<uuid::Uuid>,
    Option<DateTime<Utc>>,
);

fn review_columns(review: Option<&Review>) -> ReviewColumns {
    review.map_or((None, None, None), |review| {
        (
            review.comments().map(str::to_owned),
            Some(review.reviewer().into_inner()),
            Some(review.reviewed_at()),
        )
    })
}

fn review_from_columns(
    comments: Option<String>,
    reviewed_by: Option<uuid::Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
) -> SubmissionStoreResult<Option<Review>> {
    match (reviewed_by, reviewed_at) {
        (Some(reviewer), Some(timestamp)) => Ok(Some(Review::new(
            StudentId::from_uuid(reviewer),
            comments,
            timestamp,
        ))),
        (None, None) => Ok(None),
        _ => Err(SubmissionStoreError::persistence(std::io::Error::other(
            "review columns are partially populated",
        ))),
    }
}

fn original_to_new_row(submission: &OriginalSubmission) -> SubmissionStoreResult<NewOriginalRow> {
    let attempt = i32::try_from(submission.attempt().value())
        .map_err(SubmissionStoreError::persistence)?;
    let (review_comments, reviewed_by, reviewed_at) = review_columns(submission.review());

    Ok(NewOriginalRow {
        id: submission.id().into_inner(),
        task_id: submission.task_id().into_inner(),
        submitter: submission.submitter().into_inner(),
        body: submission.body().to_owned(),
        file_refs: file_refs_to_value(submission.file_refs())?,
        status: submission.status().as_str().to_owned(),
        attempt,
        submitted_at: submission.submitted_at(),
        review_comments,
        reviewed_by,
        reviewed_at,
    })
}

fn row_to_original(row: OriginalRow) -> SubmissionStoreResult<OriginalSubmission> {
    let OriginalRow {
        id,
        task_id,
        submitter,
        body,
        file_refs,
        status: persisted_status,
        attempt: persisted_attempt,
        submitted_at,
        review_comments,
        reviewed_by,
        reviewed_at,
    } = row;

    let attempt_value =
        u32::try_from(persisted_attempt).map_err(SubmissionStoreError::persistence)?;
    let attempt = AttemptNumber::new(attempt_value).map_err(SubmissionStoreError::persistence)?;
    let status = SubmissionStatus::try_from(persisted_status.as_str())
        .map_err(SubmissionStoreError::persistence)?;
    let review = review_from_columns(review_comments, reviewed_by, reviewed_at)?;

    let data = PersistedOriginalData {
        id: SubmissionId::from_uuid(id),
        task_id: TaskId::from_uuid(task_id),
        submitter: StudentId::from_uuid(submitter),
        body,
        file_refs: value_to_file_refs(file_refs)?,
        status,
        attempt,
        submitted_at,
        review,
    };
    Ok(OriginalSubmission::from_persisted(data))
}

fn revision_to_new_row(revision: &RevisionSubmission) -> SubmissionStoreResult<NewRevisionRow> {
    let ordinal =
        i32::try_from(revision.revision().value()).map_err(SubmissionStoreError::persistence)?;
    let (review_comments, reviewed_by, reviewed_at) = review_columns(revision.review());

    Ok(NewRevisionRow {
        id: revision.id().into_inner(),
        original_id: revision.original_id().into_inner(),
        task_id: revision.task_id().into_inner(),
        submitter: revision.submitter().into_inner(),
        body: revision.body().to_owned(),
        file_refs: file_refs_to_value(revision.file_refs())?,
        status: revision.status().as_str().to_owned(),
        revision: ordinal,
        submitted_at: revision.submitted_at(),
        review_comments,
        reviewed_by,
        reviewed_at,
    })
}

fn row_to_revision(row: RevisionRow) -> SubmissionStoreResult<RevisionSubmission> {
    let RevisionRow {
        id,
        original_id,
        task_id,
        submitter,
        body,
        file_refs,
        status: persisted_status,
        revision: persisted_ordinal,
        submitted_at,
        review_comments,
        reviewed_by,
        reviewed_at,
    } = row;

    let ordinal_value =
        u32::try_from(persisted_ordinal).map_err(SubmissionStoreError::persistence)?;
    let ordinal =
        RevisionNumber::new(ordinal_value).map_err(SubmissionStoreError::persistence)?;
    let status = SubmissionStatus::try_from(persisted_status.as_str())
        .map_err(SubmissionStoreError::persistence)?;
    let review = review_from_columns(review_comments, reviewed_by, reviewed_at)?;

    let data = PersistedRevisionData {
        id: RevisionId::from_uuid(id),
        original_id: SubmissionId::from_uuid(original_id),
        task_id: TaskId::from_uuid(task_id),
        submitter: StudentId::from_uuid(submitter),
        body,
        file_refs: value_to_file_refs(file_refs)?,
        status,
        revision: ordinal,
        submitted_at,
        review,
    };
    Ok(RevisionSubmission::from_persisted(data))
}
