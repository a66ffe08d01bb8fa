//! Error types for task domain validation and status transitions.

use super::{StudentId, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The attempt limit is invalid.
    #[error("invalid attempt limit {0}, expected a positive integer")]
    InvalidAttemptLimit(u32),

    /// The requested status transition is not permitted.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The task whose transition was rejected.
        task_id: TaskId,
        /// The current status.
        from: TaskStatus,
        /// The rejected target status.
        to: TaskStatus,
    },

    /// The task does not accept further original submissions in its current
    /// status.
    #[error("task {task_id} does not accept original submissions while {status}")]
    NotAcceptingOriginals {
        /// The task that rejected the submission.
        task_id: TaskId,
        /// The status the task was in.
        status: TaskStatus,
    },

    /// The task is not awaiting a revision.
    #[error("task {task_id} is not awaiting a revision while {status}")]
    NotAwaitingRevision {
        /// The task that rejected the revision.
        task_id: TaskId,
        /// The status the task was in.
        status: TaskStatus,
    },

    /// All allowed attempts have been used.
    #[error("task {task_id} has used all {limit} allowed attempts")]
    AttemptLimitReached {
        /// The task whose budget is exhausted.
        task_id: TaskId,
        /// The configured attempt limit.
        limit: u32,
    },

    /// The acting student is not the task's assignee.
    #[error("student {student} is not assigned to task {task_id}")]
    NotAssignee {
        /// The task in question.
        task_id: TaskId,
        /// The student who attempted the action.
        student: StudentId,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
