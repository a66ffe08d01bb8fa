//! Diesel schema for task persistence.

diesel::table! {
    /// Task records assigned to students within a project phase.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Phase the task belongs to.
        phase_id -> Uuid,
        /// Group the task was assigned within.
        group_id -> Uuid,
        /// Assigned student.
        assignee -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional task description.
        description -> Nullable<Text>,
        /// Maximum allowed original submission attempts.
        max_attempts -> Int4,
        /// Consumed original submission attempts.
        attempts_used -> Int4,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
