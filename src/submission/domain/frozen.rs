//! Frozen snapshot of the authoritative submission for one task/student
//! pair within a phase.

use super::{DisplayStatus, FrozenSubmissionId, ResolvedSubmission, SubmissionId};
use crate::task::domain::{GroupId, PhaseId, StudentId, Task, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniqueness key of a frozen snapshot.
///
/// Exactly one snapshot may exist per key; the `PostgreSQL` adapter enforces
/// this with a unique index and the in-memory adapter with its map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrozenScopeKey {
    /// The finalized phase.
    pub phase_id: PhaseId,
    /// The frozen task.
    pub task_id: TaskId,
    /// The assigned student.
    pub student: StudentId,
    /// The group the freeze ran for.
    pub group_id: GroupId,
}

impl fmt::Display for FrozenScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phase {} task {} student {} group {}",
            self.phase_id, self.task_id, self.student, self.group_id
        )
    }
}

/// Immutable-once-written snapshot of one task's authoritative submission.
///
/// Title, description, body, and file references are copies; later edits to
/// the live task or submission rows cannot retroactively alter the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrozenSubmission {
    id: FrozenSubmissionId,
    phase_id: PhaseId,
    group_id: GroupId,
    task_id: TaskId,
    student: StudentId,
    source_submission_id: Option<SubmissionId>,
    task_title: String,
    task_description: Option<String>,
    body: String,
    file_refs: Vec<String>,
    display_status: DisplayStatus,
    submitted_at: Option<DateTime<Utc>>,
    frozen_at: DateTime<Utc>,
    frozen_by: StudentId,
}

/// Parameter object for reconstructing a persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFrozenData {
    /// Persisted snapshot identifier.
    pub id: FrozenSubmissionId,
    /// Persisted phase reference.
    pub phase_id: PhaseId,
    /// Persisted group reference.
    pub group_id: GroupId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted student reference.
    pub student: StudentId,
    /// Persisted provenance reference (an original submission id).
    pub source_submission_id: Option<SubmissionId>,
    /// Persisted task title copy.
    pub task_title: String,
    /// Persisted task description copy.
    pub task_description: Option<String>,
    /// Persisted submission text copy.
    pub body: String,
    /// Persisted file reference copies.
    pub file_refs: Vec<String>,
    /// Persisted display status.
    pub display_status: DisplayStatus,
    /// Persisted original submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Persisted freeze timestamp.
    pub frozen_at: DateTime<Utc>,
    /// Persisted identity of the leader who triggered the freeze.
    pub frozen_by: StudentId,
}

impl FrozenSubmission {
    /// Captures a snapshot of the resolved submission for `task`.
    ///
    /// Copies the task's title and description and takes ownership of the
    /// resolved view's content. The freeze timestamp comes from `clock`.
    #[must_use]
    pub fn capture(
        task: &Task,
        resolved: ResolvedSubmission,
        frozen_by: StudentId,
        clock: &impl Clock,
    ) -> Self {
        let display_status = resolved.display_status();
        let submitted_at = resolved.submitted_at();
        let source_submission_id = resolved.source_submission_id();
        let (body, file_refs) = resolved.into_content();

        Self {
            id: FrozenSubmissionId::new(),
            phase_id: task.phase_id(),
            group_id: task.group_id(),
            task_id: task.id(),
            student: task.assignee(),
            source_submission_id,
            task_title: task.title().to_owned(),
            task_description: task.description().map(str::to_owned),
            body,
            file_refs,
            display_status,
            submitted_at,
            frozen_at: clock.utc(),
            frozen_by,
        }
    }

    /// Reconstructs a snapshot from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFrozenData) -> Self {
        Self {
            id: data.id,
            phase_id: data.phase_id,
            group_id: data.group_id,
            task_id: data.task_id,
            student: data.student,
            source_submission_id: data.source_submission_id,
            task_title: data.task_title,
            task_description: data.task_description,
            body: data.body,
            file_refs: data.file_refs,
            display_status: data.display_status,
            submitted_at: data.submitted_at,
            frozen_at: data.frozen_at,
            frozen_by: data.frozen_by,
        }
    }

    /// Returns the snapshot identifier.
    #[must_use]
    pub const fn id(&self) -> FrozenSubmissionId {
        self.id
    }

    /// Returns the uniqueness key of this snapshot.
    #[must_use]
    pub const fn scope_key(&self) -> FrozenScopeKey {
        FrozenScopeKey {
            phase_id: self.phase_id,
            task_id: self.task_id,
            student: self.student,
            group_id: self.group_id,
        }
    }

    /// Returns the finalized phase.
    #[must_use]
    pub const fn phase_id(&self) -> PhaseId {
        self.phase_id
    }

    /// Returns the group the freeze ran for.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the frozen task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assigned student.
    #[must_use]
    pub const fn student(&self) -> StudentId {
        self.student
    }

    /// Returns the provenance reference.
    ///
    /// Always an original submission id, never a revision id.
    #[must_use]
    pub const fn source_submission_id(&self) -> Option<SubmissionId> {
        self.source_submission_id
    }

    /// Returns the copied task title.
    #[must_use]
    pub fn task_title(&self) -> &str {
        &self.task_title
    }

    /// Returns the copied task description, if any.
    #[must_use]
    pub fn task_description(&self) -> Option<&str> {
        self.task_description.as_deref()
    }

    /// Returns the copied submission text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the copied file references.
    #[must_use]
    pub fn file_refs(&self) -> &[String] {
        &self.file_refs
    }

    /// Returns the normalized display status.
    #[must_use]
    pub const fn display_status(&self) -> DisplayStatus {
        self.display_status
    }

    /// Returns when the snapshotted submission was originally made.
    #[must_use]
    pub const fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    /// Returns the freeze timestamp.
    #[must_use]
    pub const fn frozen_at(&self) -> DateTime<Utc> {
        self.frozen_at
    }

    /// Returns the leader who triggered the freeze.
    #[must_use]
    pub const fn frozen_by(&self) -> StudentId {
        self.frozen_by
    }
}
