//! Unit tests for task status transition validation.

use crate::task::domain::{
    AttemptLimit, GroupId, PhaseId, StudentId, Task, TaskDomainError, TaskDraft, TaskStatus,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn pending_task(clock: DefaultClock) -> Result<Task, TaskDomainError> {
    let draft = TaskDraft::new(
        PhaseId::new(),
        GroupId::new(),
        StudentId::new(),
        "Status transition test",
        AttemptLimit::new(3)?,
    )?;
    Ok(Task::new(draft, &clock))
}

#[rstest]
#[case(TaskStatus::Pending, TaskStatus::Pending, false)]
#[case(TaskStatus::Pending, TaskStatus::Submitted, true)]
#[case(TaskStatus::Pending, TaskStatus::ToRevise, false)]
#[case(TaskStatus::Pending, TaskStatus::Completed, false)]
#[case(TaskStatus::Submitted, TaskStatus::Pending, false)]
#[case(TaskStatus::Submitted, TaskStatus::Submitted, false)]
#[case(TaskStatus::Submitted, TaskStatus::ToRevise, true)]
#[case(TaskStatus::Submitted, TaskStatus::Completed, true)]
#[case(TaskStatus::ToRevise, TaskStatus::Pending, false)]
#[case(TaskStatus::ToRevise, TaskStatus::Submitted, true)]
#[case(TaskStatus::ToRevise, TaskStatus::ToRevise, false)]
#[case(TaskStatus::ToRevise, TaskStatus::Completed, true)]
#[case(TaskStatus::Completed, TaskStatus::Pending, false)]
#[case(TaskStatus::Completed, TaskStatus::Submitted, false)]
#[case(TaskStatus::Completed, TaskStatus::ToRevise, false)]
#[case(TaskStatus::Completed, TaskStatus::Completed, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Pending, false)]
#[case(TaskStatus::Submitted, false)]
#[case(TaskStatus::ToRevise, false)]
#[case(TaskStatus::Completed, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
fn transition_from_pending_to_submitted_succeeds(
    clock: DefaultClock,
    pending_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    let original_updated_at = task.updated_at();

    task.transition_to(TaskStatus::Submitted, &clock)?;

    eyre::ensure!(task.status() == TaskStatus::Submitted);
    eyre::ensure!(task.updated_at() >= original_updated_at);
    Ok(())
}

#[rstest]
fn transition_from_pending_to_completed_is_rejected(
    clock: DefaultClock,
    pending_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    let task_id = task.id();

    let result = task.transition_to(TaskStatus::Completed, &clock);

    eyre::ensure!(
        result
            == Err(TaskDomainError::InvalidStatusTransition {
                task_id,
                from: TaskStatus::Pending,
                to: TaskStatus::Completed,
            })
    );
    eyre::ensure!(task.status() == TaskStatus::Pending);
    Ok(())
}

#[rstest]
fn completed_tasks_admit_no_further_transitions(
    clock: DefaultClock,
    pending_task: Result<Task, TaskDomainError>,
) -> eyre::Result<()> {
    let mut task = pending_task?;
    task.transition_to(TaskStatus::Submitted, &clock)?;
    task.transition_to(TaskStatus::Completed, &clock)?;

    for target in [
        TaskStatus::Pending,
        TaskStatus::Submitted,
        TaskStatus::ToRevise,
        TaskStatus::Completed,
    ] {
        eyre::ensure!(task.transition_to(target, &clock).is_err());
    }
    Ok(())
}
