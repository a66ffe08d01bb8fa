//! Service layer for leader-side task creation and retrieval.

use crate::task::{
    domain::{AttemptLimit, GroupId, PhaseId, StudentId, Task, TaskDomainError, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Default attempt budget applied when a leader does not set one.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Request payload for assigning a task to a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskRequest {
    phase_id: PhaseId,
    group_id: GroupId,
    assignee: StudentId,
    title: String,
    description: Option<String>,
    max_attempts: Option<u32>,
}

impl AssignTaskRequest {
    /// Creates a request with required assignment fields.
    #[must_use]
    pub fn new(
        phase_id: PhaseId,
        group_id: GroupId,
        assignee: StudentId,
        title: impl Into<String>,
    ) -> Self {
        Self {
            phase_id,
            group_id,
            assignee,
            title: title.into(),
            description: None,
            max_attempts: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Overrides the default attempt budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Service-level errors for task assignment operations.
#[derive(Debug, Error)]
pub enum TaskAssignmentError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task assignment service operations.
pub type TaskAssignmentResult<T> = Result<T, TaskAssignmentError>;

/// Task assignment orchestration service.
#[derive(Clone)]
pub struct TaskAssignmentService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskAssignmentService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task assignment service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAssignmentError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn assign(&self, request: AssignTaskRequest) -> TaskAssignmentResult<Task> {
        let limit = AttemptLimit::new(request.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS))?;
        let mut draft = TaskDraft::new(
            request.phase_id,
            request.group_id,
            request.assignee,
            request.title,
            limit,
        )?;
        if let Some(description) = request.description {
            draft = draft.with_description(description);
        }

        let task = Task::new(draft, &*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAssignmentError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskAssignmentResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists a phase's tasks for one group.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAssignmentError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_phase_tasks(
        &self,
        phase_id: PhaseId,
        group_id: GroupId,
    ) -> TaskAssignmentResult<Vec<Task>> {
        Ok(self
            .repository
            .list_by_phase_and_group(phase_id, group_id)
            .await?)
    }
}
