//! Freeze service: snapshot the authoritative submission per task when a
//! leader finalizes a phase.
//!
//! Each task freezes independently. The writer runs the resolution
//! algorithm over the stored rows, captures a snapshot, and inserts it
//! under the reject-duplicate policy: an existing snapshot for the same
//! scope key surfaces as the `AlreadyFrozen` outcome, not an error. A
//! failing task never aborts its siblings; the batch report carries one
//! entry per enumerated task.

use crate::submission::{
    domain::{DisplayStatus, FrozenSubmission, SelectionKind, resolve},
    ports::{FrozenStoreError, FrozenSubmissionStore, SubmissionStore, SubmissionStoreError},
};
use crate::task::{
    domain::{GroupId, PhaseId, StudentId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Per-task failure recorded in a freeze report.
#[derive(Debug, Clone, Error)]
pub enum FreezeTaskError {
    /// Reading the submission rows failed; no resolution result was
    /// fabricated.
    #[error("submission lookup failed: {0}")]
    Lookup(#[source] SubmissionStoreError),

    /// Writing the snapshot failed for a reason other than the uniqueness
    /// guard.
    #[error("snapshot write failed: {0}")]
    Write(#[source] FrozenStoreError),
}

/// Outcome of freezing one task.
#[derive(Debug, Clone)]
pub enum FreezeOutcome {
    /// A snapshot was written.
    Created {
        /// Which priority branch selected the snapshotted submission.
        selection: SelectionKind,
        /// The status a grader will see.
        display_status: DisplayStatus,
    },
    /// A snapshot for the scope key already existed; nothing was written.
    AlreadyFrozen {
        /// Which priority branch the fresh resolution took.
        selection: SelectionKind,
        /// The display status the fresh resolution produced.
        display_status: DisplayStatus,
    },
    /// The freeze failed for this task alone.
    Failed {
        /// What went wrong.
        error: FreezeTaskError,
    },
}

impl FreezeOutcome {
    /// Returns whether a snapshot was written.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// Returns whether an existing snapshot was left in place.
    #[must_use]
    pub const fn is_already_frozen(&self) -> bool {
        matches!(self, Self::AlreadyFrozen { .. })
    }

    /// Returns whether the task's freeze failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Report for one task within a freeze operation.
#[derive(Debug, Clone)]
pub struct TaskFreezeReport {
    /// The frozen task.
    pub task_id: TaskId,
    /// What happened.
    pub outcome: FreezeOutcome,
}

/// Aggregated report for freezing a phase/group pair.
#[derive(Debug, Clone)]
pub struct PhaseFreezeReport {
    phase_id: PhaseId,
    group_id: GroupId,
    tasks: Vec<TaskFreezeReport>,
}

impl PhaseFreezeReport {
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

    /// Returns the per-task reports, one per enumerated task.
    #[must_use]
    pub fn tasks(&self) -> &[TaskFreezeReport] {
        &self.tasks
    }

    /// Returns how many tasks produced a fresh snapshot.
    #[must_use]
    pub fn created(&self) -> usize {
        self.count(FreezeOutcome::is_created)
    }

    /// Returns how many tasks were already frozen.
    #[must_use]
    pub fn already_frozen(&self) -> usize {
        self.count(FreezeOutcome::is_already_frozen)
    }

    /// Returns how many tasks failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(FreezeOutcome::is_failed)
    }

    fn count(&self, predicate: fn(&FreezeOutcome) -> bool) -> usize {
        self.tasks
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Service-level errors raised before per-task work begins.
#[derive(Debug, Error)]
pub enum FreezeServiceError {
    /// Enumerating the phase's tasks failed.
    #[error("phase roster lookup failed: {0}")]
    Roster(#[from] TaskRepositoryError),
}

/// Result type for freeze service operations.
pub type FreezeServiceResult<T> = Result<T, FreezeServiceError>;

/// Freeze orchestration service.
#[derive(Clone)]
pub struct FreezeService<S, F, T, C>
where
    S: SubmissionStore,
    F: FrozenSubmissionStore,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    submissions: Arc<S>,
    frozen: Arc<F>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<S, F, T, C> FreezeService<S, F, T, C>
where
    S: SubmissionStore,
    F: FrozenSubmissionStore,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new freeze service.
    #[must_use]
    pub const fn new(submissions: Arc<S>, frozen: Arc<F>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            submissions,
            frozen,
            tasks,
            clock,
        }
    }

    /// Freezes a single task for the given leader.
    ///
    /// Never returns an error: every failure is folded into the report's
    /// outcome so sibling tasks in a batch are unaffected.
    pub async fn freeze_task(&self, task: &Task, frozen_by: StudentId) -> TaskFreezeReport {
        let outcome = match self.try_freeze(task, frozen_by).await {
            Ok(outcome) => outcome,
            Err(error) => FreezeOutcome::Failed { error },
        };
        TaskFreezeReport {
            task_id: task.id(),
            outcome,
        }
    }

    /// Freezes every task of a phase assigned within a group.
    ///
    /// Tasks freeze independently; re-running is safe and surfaces existing
    /// snapshots as `AlreadyFrozen`.
    ///
    /// # Errors
    ///
    /// Returns [`FreezeServiceError::Roster`] only when the roster
    /// enumeration itself fails, before any per-task work.
    pub async fn freeze_phase(
        &self,
        phase_id: PhaseId,
        group_id: GroupId,
        frozen_by: StudentId,
    ) -> FreezeServiceResult<PhaseFreezeReport> {
        let roster = self
            .tasks
            .list_by_phase_and_group(phase_id, group_id)
            .await?;

        let mut reports = Vec::with_capacity(roster.len());
        for task in &roster {
            reports.push(self.freeze_task(task, frozen_by).await);
        }

        Ok(PhaseFreezeReport {
            phase_id,
            group_id,
            tasks: reports,
        })
    }

    async fn try_freeze(
        &self,
        task: &Task,
        frozen_by: StudentId,
    ) -> Result<FreezeOutcome, FreezeTaskError> {
        let originals = self
            .submissions
            .originals_for_task(task.id(), task.assignee())
            .await
            .map_err(FreezeTaskError::Lookup)?;
        let revisions = self
            .submissions
            .revisions_for_task(task.id(), task.assignee())
            .await
            .map_err(FreezeTaskError::Lookup)?;

        let resolved = resolve(&originals, &revisions);
        let selection = resolved.selection();
        let display_status = resolved.display_status();

        let snapshot = FrozenSubmission::capture(task, resolved, frozen_by, &*self.clock);
        match self.frozen.insert(&snapshot).await {
            Ok(()) => Ok(FreezeOutcome::Created {
                selection,
                display_status,
            }),
            Err(FrozenStoreError::AlreadyFrozen(_)) => Ok(FreezeOutcome::AlreadyFrozen {
                selection,
                display_status,
            }),
            Err(err) => Err(FreezeTaskError::Write(err)),
        }
    }
}
