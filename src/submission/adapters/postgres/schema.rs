//! Diesel schema for submission persistence.

diesel::table! {
    /// Original submission attempts.
    task_submissions (id) {
        /// Submission identifier.
        id -> Uuid,
        /// Task reference.
        task_id -> Uuid,
        /// Submitting student.
        submitter -> Uuid,
        /// Free-text body.
        body -> Text,
        /// Opaque file references, serialized as a JSON array.
        file_refs -> Jsonb,
        /// Review status.
        #[max_length = 50]
        status -> Varchar,
        /// Attempt ordinal, unique per (task, submitter).
        attempt -> Int4,
        /// Submission timestamp.
        submitted_at -> Timestamptz,
        /// Reviewer comments, if reviewed.
        review_comments -> Nullable<Text>,
        /// Reviewing leader, if reviewed.
        reviewed_by -> Nullable<Uuid>,
        /// Review timestamp, if reviewed.
        reviewed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Revision submissions following a revision request.
    revision_submissions (id) {
        /// Revision identifier.
        id -> Uuid,
        /// Originating original submission.
        original_id -> Uuid,
        /// Task reference.
        task_id -> Uuid,
        /// Submitting student.
        submitter -> Uuid,
        /// Free-text body.
        body -> Text,
        /// Opaque file references, serialized as a JSON array.
        file_refs -> Jsonb,
        /// Review status.
        #[max_length = 50]
        status -> Varchar,
        /// Revision ordinal, unique per (task, submitter).
        revision -> Int4,
        /// Submission timestamp.
        submitted_at -> Timestamptz,
        /// Reviewer comments, if reviewed.
        review_comments -> Nullable<Text>,
        /// Reviewing leader, if reviewed.
        reviewed_by -> Nullable<Uuid>,
        /// Review timestamp, if reviewed.
        reviewed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Frozen snapshots of authoritative submissions.
    frozen_task_submissions (id) {
        /// Snapshot identifier.
        id -> Uuid,
        /// Finalized phase.
        phase_id -> Uuid,
        /// Group the freeze ran for.
        group_id -> Uuid,
        /// Frozen task.
        task_id -> Uuid,
        /// Assigned student.
        student -> Uuid,
        /// Provenance reference into `task_submissions`.
        source_submission_id -> Nullable<Uuid>,
        /// Copied task title.
        #[max_length = 255]
        task_title -> Varchar,
        /// Copied task description.
        task_description -> Nullable<Text>,
        /// Copied submission text.
        body -> Text,
        /// Copied file references, serialized as a JSON array.
        file_refs -> Jsonb,
        /// Normalized display status.
        #[max_length = 50]
        display_status -> Varchar,
        /// Original submission timestamp.
        submitted_at -> Nullable<Timestamptz>,
        /// Freeze timestamp.
        frozen_at -> Timestamptz,
        /// Leader who triggered the freeze.
        frozen_by -> Uuid,
    }
}
