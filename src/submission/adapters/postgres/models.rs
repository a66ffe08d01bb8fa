//! Diesel row models for submission persistence.

use super::schema::{frozen_task_submissions, revision_submissions, task_submissions};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for original submissions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OriginalRow {
    /// Submission identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Submitting student.
    pub submitter: uuid::Uuid,
    /// Free-text body.
    pub body: String,
    /// File references JSON payload.
    pub file_refs: Value,
    /// Review status.
    pub status: String,
    /// Attempt ordinal.
    pub attempt: i32,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Reviewer comments.
    pub review_comments: Option<String>,
    /// Reviewing leader.
    pub reviewed_by: Option<uuid::Uuid>,
    /// Review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Insert model for original submissions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_submissions)]
pub struct NewOriginalRow {
    /// Submission identifier.
    pub id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Submitting student.
    pub submitter: uuid::Uuid,
    /// Free-text body.
    pub body: String,
    /// File references JSON payload.
    pub file_refs: Value,
    /// Review status.
    pub status: String,
    /// Attempt ordinal.
    pub attempt: i32,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Reviewer comments.
    pub review_comments: Option<String>,
    /// Reviewing leader.
    pub reviewed_by: Option<uuid::Uuid>,
    /// Review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Query result row for revision submissions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = revision_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RevisionRow {
    /// Revision identifier.
    pub id: uuid::Uuid,
    /// Originating original submission.
    pub original_id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Submitting student.
    pub submitter: uuid::Uuid,
    /// Free-text body.
    pub body: String,
    /// File references JSON payload.
    pub file_refs: Value,
    /// Review status.
    pub status: String,
    /// Revision ordinal.
    pub revision: i32,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Reviewer comments.
    pub review_comments: Option<String>,
    /// Reviewing leader.
    pub reviewed_by: Option<uuid::Uuid>,
    /// Review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Insert model for revision submissions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = revision_submissions)]
pub struct NewRevisionRow {
    /// Revision identifier.
    pub id: uuid::Uuid,
    /// Originating original submission.
    pub original_id: uuid::Uuid,
    /// Task reference.
    pub task_id: uuid::Uuid,
    /// Submitting student.
    pub submitter: uuid::Uuid,
    /// Free-text body.
    pub body: String,
    /// File references JSON payload.
    pub file_refs: Value,
    /// Review status.
    pub status: String,
    /// Revision ordinal.
    pub revision: i32,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Reviewer comments.
    pub review_comments: Option<String>,
    /// Reviewing leader.
    pub reviewed_by: Option<uuid::Uuid>,
    /// Review timestamp.
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Query result row for frozen snapshots.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = frozen_task_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FrozenRow {
    /// Snapshot identifier.
    pub id: uuid::Uuid,
    /// Finalized phase.
    pub phase_id: uuid::Uuid,
    /// Group the freeze ran for.
    pub group_id: uuid::Uuid,
    /// Frozen task.
    pub task_id: uuid::Uuid,
    /// Assigned student.
    pub student: uuid::Uuid,
    /// Provenance reference.
    pub source_submission_id: Option<uuid::Uuid>,
    /// Copied task title.
    pub task_title: String,
    /// Copied task description.
    pub task_description: Option<String>,
    /// Copied submission text.
    pub body: String,
    /// Copied file references JSON payload.
    pub file_refs: Value,
    /// Normalized display status.
    pub display_status: String,
    /// Original submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Freeze timestamp.
    pub frozen_at: DateTime<Utc>,
    /// Leader who triggered the freeze.
    pub frozen_by: uuid::Uuid,
}

/// Insert model for frozen snapshots.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = frozen_task_submissions)]
pub struct NewFrozenRow {
    /// Snapshot identifier.
    pub id: uuid::Uuid,
    /// Finalized phase.
    pub phase_id: uuid::Uuid,
    /// Group the freeze ran for.
    pub group_id: uuid::Uuid,
    /// Frozen task.
    pub task_id: uuid::Uuid,
    /// Assigned student.
    pub student: uuid::Uuid,
    /// Provenance reference.
    pub source_submission_id: Option<uuid::Uuid>,
    /// Copied task title.
    pub task_title: String,
    /// Copied task description.
    pub task_description: Option<String>,
    /// Copied submission text.
    pub body: String,
    /// Copied file references JSON payload.
    pub file_refs: Value,
    /// Normalized display status.
    pub display_status: String,
    /// Original submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Freeze timestamp.
    pub frozen_at: DateTime<Utc>,
    /// Leader who triggered the freeze.
    pub frozen_by: uuid::Uuid,
}
