//! Task aggregate root and related task lifecycle types.

use super::{
    AttemptLimit, GroupId, ParseTaskStatusError, PhaseId, StudentId, TaskDomainError, TaskId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been assigned but no submission has arrived.
    Pending,
    /// A submission is awaiting review.
    Submitted,
    /// The leader requested a revision; a new revision is expected.
    ToRevise,
    /// The leader approved the work.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::ToRevise => "to_revise",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the lifecycle permits moving to `target`.
    ///
    /// The transition table:
    ///
    /// - `Pending → Submitted` (first original submission arrives)
    /// - `Submitted → ToRevise` (leader requests a revision)
    /// - `Submitted → Completed` (leader approves)
    /// - `ToRevise → Submitted` (revision arrives)
    /// - `ToRevise → Completed` (leader approves without a new revision)
    ///
    /// `Completed` is terminal; every other pair is rejected.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Submitted)
                | (Self::Submitted, Self::ToRevise | Self::Completed)
                | (Self::ToRevise, Self::Submitted | Self::Completed)
        )
    }

    /// Returns whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "submitted" => Ok(Self::Submitted),
            "to_revise" => Ok(Self::ToRevise),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    phase_id: PhaseId,
    group_id: GroupId,
    assignee: StudentId,
    title: String,
    description: Option<String>,
    max_attempts: AttemptLimit,
}

impl TaskDraft {
    /// Creates a validated task draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] if the title is empty
    /// after trimming.
    pub fn new(
        phase_id: PhaseId,
        group_id: GroupId,
        assignee: StudentId,
        title: impl Into<String>,
        max_attempts: AttemptLimit,
    ) -> Result<Self, TaskDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            phase_id,
            group_id,
            assignee,
            title,
            description: None,
            max_attempts,
        })
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    phase_id: PhaseId,
    group_id: GroupId,
    assignee: StudentId,
    title: String,
    description: Option<String>,
    max_attempts: AttemptLimit,
    attempts_used: u32,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted phase reference.
    pub phase_id: PhaseId,
    /// Persisted group reference.
    pub group_id: GroupId,
    /// Persisted assignee.
    pub assignee: StudentId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted attempt limit.
    pub max_attempts: AttemptLimit,
    /// Persisted count of consumed attempts.
    pub attempts_used: u32,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task from a validated draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            phase_id: draft.phase_id,
            group_id: draft.group_id,
            assignee: draft.assignee,
            title: draft.title,
            description: draft.description,
            max_attempts: draft.max_attempts,
            attempts_used: 0,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            phase_id: data.phase_id,
            group_id: data.group_id,
            assignee: data.assignee,
            title: data.title,
            description: data.description,
            max_attempts: data.max_attempts,
            attempts_used: data.attempts_used,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the phase this task belongs to.
    #[must_use]
    pub const fn phase_id(&self) -> PhaseId {
        self.phase_id
    }

    /// Returns the group this task was assigned within.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the assigned student.
    #[must_use]
    pub const fn assignee(&self) -> StudentId {
        self.assignee
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the attempt limit.
    #[must_use]
    pub const fn max_attempts(&self) -> AttemptLimit {
        self.max_attempts
    }

    /// Returns the number of consumed original submission attempts.
    #[must_use]
    pub const fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Consumes one original submission attempt and returns its ordinal.
    ///
    /// Originals are accepted while the task is `Pending`, or `Submitted`
    /// after a rejection; once a revision has been requested the revision
    /// path applies instead. The returned ordinal starts at 1 and increases
    /// by one per accepted original, which keeps attempt ordinals
    /// monotonically increasing and unique per task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAcceptingOriginals`] for terminal or
    /// revision-awaiting statuses, and
    /// [`TaskDomainError::AttemptLimitReached`] when the budget is
    /// exhausted.
    pub fn record_attempt(&mut self, clock: &impl Clock) -> Result<u32, TaskDomainError> {
        if !matches!(self.status, TaskStatus::Pending | TaskStatus::Submitted) {
            return Err(TaskDomainError::NotAcceptingOriginals {
                task_id: self.id,
                status: self.status,
            });
        }
        if self.attempts_used >= self.max_attempts.value() {
            return Err(TaskDomainError::AttemptLimitReached {
                task_id: self.id,
                limit: self.max_attempts.value(),
            });
        }
        self.attempts_used += 1;
        self.status = TaskStatus::Submitted;
        self.touch(clock);
        Ok(self.attempts_used)
    }

    /// Records the arrival of a revision submission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAwaitingRevision`] unless the task is
    /// in `ToRevise`.
    pub fn record_revision(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.status != TaskStatus::ToRevise {
            return Err(TaskDomainError::NotAwaitingRevision {
                task_id: self.id,
                status: self.status,
            });
        }
        self.transition_to(TaskStatus::Submitted, clock)
    }

    /// Moves the task to `target` if the lifecycle permits it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the
    /// transition table rejects the pair.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
