//! Service orchestration tests for phase freezing.

use std::sync::Arc;

use crate::submission::{
    adapters::memory::{InMemoryFrozenSubmissionStore, InMemorySubmissionStore},
    domain::{
        DisplayStatus, FrozenScopeKey, FrozenSubmission, MISSING_SUBMISSION_BODY, ReviewVerdict,
        SelectionKind,
    },
    ports::{FrozenStoreError, FrozenStoreResult, FrozenSubmissionStore},
    services::{
        FreezeOutcome, FreezeService, ReviewRequest, SubmissionIntakeService,
        SubmitOriginalRequest, SubmitRevisionRequest,
    },
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        AttemptLimit, GroupId, PhaseId, StudentId, Task, TaskDraft, TaskId,
    },
    ports::TaskRepository,
};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestIntake =
    SubmissionIntakeService<InMemorySubmissionStore, InMemoryTaskRepository, DefaultClock>;
type TestFreeze = FreezeService<
    InMemorySubmissionStore,
    InMemoryFrozenSubmissionStore,
    InMemoryTaskRepository,
    DefaultClock,
>;

struct Harness {
    intake: TestIntake,
    freeze: TestFreeze,
    submissions: Arc<InMemorySubmissionStore>,
    frozen: Arc<InMemoryFrozenSubmissionStore>,
    tasks: Arc<InMemoryTaskRepository>,
    phase: PhaseId,
    group: GroupId,
    leader: StudentId,
}

#[fixture]
fn harness() -> Harness {
    let submissions = Arc::new(InMemorySubmissionStore::new());
    let frozen = Arc::new(InMemoryFrozenSubmissionStore::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    let intake = SubmissionIntakeService::new(
        Arc::clone(&submissions),
        Arc::clone(&tasks),
        Arc::clone(&clock),
    );
    let freeze = FreezeService::new(
        Arc::clone(&submissions),
        Arc::clone(&frozen),
        Arc::clone(&tasks),
        clock,
    );
    Harness {
        intake,
        freeze,
        submissions,
        frozen,
        tasks,
        phase: PhaseId::new(),
        group: GroupId::new(),
        leader: StudentId::new(),
    }
}

async fn seed_task(harness: &Harness, assignee: StudentId, title: &str) -> Task {
    let draft = TaskDraft::new(
        harness.phase,
        harness.group,
        assignee,
        title,
        AttemptLimit::new(3).expect("valid limit"),
    )
    .expect("valid draft");
    let task = Task::new(draft, &DefaultClock);
    harness.tasks.store(&task).await.expect("task stored");
    task
}

fn scope_key(harness: &Harness, task: &Task) -> FrozenScopeKey {
    FrozenScopeKey {
        phase_id: harness.phase,
        task_id: task.id(),
        student: task.assignee(),
        group_id: harness.group,
    }
}

async fn stored_snapshot(harness: &Harness, task: &Task) -> FrozenSubmission {
    harness
        .frozen
        .find_by_scope(&scope_key(harness, task))
        .await
        .expect("lookup succeeds")
        .expect("snapshot exists")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unworked_tasks_freeze_a_placeholder_snapshot(harness: Harness) {
    let task = seed_task(&harness, StudentId::new(), "Never started").await;

    let report = harness.freeze.freeze_task(&task, harness.leader).await;

    assert!(matches!(
        report.outcome,
        FreezeOutcome::Created {
            selection: SelectionKind::AssignedNoSubmission,
            display_status: DisplayStatus::NoSubmission,
        }
    ));
    let snapshot = stored_snapshot(&harness, &task).await;
    assert_eq!(snapshot.body(), MISSING_SUBMISSION_BODY);
    assert!(snapshot.submitted_at().is_none());
    assert!(snapshot.source_submission_id().is_none());
    assert_eq!(snapshot.frozen_by(), harness.leader);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn frozen_snapshot_records_revision_provenance(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, "Survey related work").await;

    let submission = harness
        .intake
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Draft"))
        .await
        .expect("submission accepted");
    harness
        .intake
        .review_original(
            submission.id(),
            ReviewRequest::new(harness.leader, ReviewVerdict::RequestRevision),
        )
        .await
        .expect("review recorded");
    harness
        .intake
        .submit_revision(SubmitRevisionRequest::new(
            submission.id(),
            assignee,
            "Expanded survey",
        ))
        .await
        .expect("revision accepted");

    let current = harness
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists");
    let report = harness.freeze.freeze_task(&current, harness.leader).await;

    assert!(matches!(
        report.outcome,
        FreezeOutcome::Created {
            selection: SelectionKind::LatestRevision,
            display_status: DisplayStatus::Pending,
        }
    ));
    let snapshot = stored_snapshot(&harness, &task).await;
    // Provenance points at the originating submission, not the revision row.
    assert_eq!(snapshot.source_submission_id(), Some(submission.id()));
    assert_eq!(snapshot.body(), "Expanded survey");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refreezing_reports_already_frozen_and_keeps_the_snapshot(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, "Write the abstract").await;
    harness
        .intake
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Abstract v1"))
        .await
        .expect("submission accepted");

    let first = harness.freeze.freeze_task(&task, harness.leader).await;
    assert!(first.outcome.is_created());
    let original_snapshot = stored_snapshot(&harness, &task).await;

    let second = harness.freeze.freeze_task(&task, harness.leader).await;

    assert!(matches!(
        second.outcome,
        FreezeOutcome::AlreadyFrozen {
            selection: SelectionKind::LatestOriginal,
            display_status: DisplayStatus::Pending,
        }
    ));
    assert_eq!(stored_snapshot(&harness, &task).await, original_snapshot);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn later_review_edits_do_not_change_the_snapshot(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, "Prepare slides").await;
    let submission = harness
        .intake
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Slides v1"))
        .await
        .expect("submission accepted");

    harness.freeze.freeze_task(&task, harness.leader).await;
    let before = stored_snapshot(&harness, &task).await;
    assert_eq!(before.display_status(), DisplayStatus::Pending);

    harness
        .intake
        .review_original(
            submission.id(),
            ReviewRequest::new(harness.leader, ReviewVerdict::Approve),
        )
        .await
        .expect("review recorded");

    let after = stored_snapshot(&harness, &task).await;
    assert_eq!(after, before);
    assert_eq!(after.display_status(), DisplayStatus::Pending);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn freeze_phase_reports_every_roster_task(harness: Harness) {
    let first_assignee = StudentId::new();
    let second_assignee = StudentId::new();
    let first = seed_task(&harness, first_assignee, "Task one").await;
    seed_task(&harness, second_assignee, "Task two").await;
    harness
        .intake
        .submit_original(SubmitOriginalRequest::new(
            first.id(),
            first_assignee,
            "Done early",
        ))
        .await
        .expect("submission accepted");

    let report = harness
        .freeze
        .freeze_phase(harness.phase, harness.group, harness.leader)
        .await
        .expect("roster enumeration succeeds");

    assert_eq!(report.tasks().len(), 2);
    assert_eq!(report.created(), 2);
    assert_eq!(report.already_frozen(), 0);
    assert_eq!(report.failed(), 0);
    let snapshots = harness
        .frozen
        .list_for_phase_group(harness.phase, harness.group)
        .await
        .expect("listing succeeds");
    assert_eq!(snapshots.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rerunning_freeze_phase_is_idempotent(harness: Harness) {
    seed_task(&harness, StudentId::new(), "Task one").await;
    seed_task(&harness, StudentId::new(), "Task two").await;

    harness
        .freeze
        .freeze_phase(harness.phase, harness.group, harness.leader)
        .await
        .expect("first run succeeds");
    let second = harness
        .freeze
        .freeze_phase(harness.phase, harness.group, harness.leader)
        .await
        .expect("second run succeeds");

    assert_eq!(second.created(), 0);
    assert_eq!(second.already_frozen(), 2);
    let snapshots = harness
        .frozen
        .list_for_phase_group(harness.phase, harness.group)
        .await
        .expect("listing succeeds");
    assert_eq!(snapshots.len(), 2);
}

mockall::mock! {
    FlakyFrozenStore {}

    #[async_trait]
    impl FrozenSubmissionStore for FlakyFrozenStore {
        async fn insert(&self, snapshot: &FrozenSubmission) -> FrozenStoreResult<()>;
        async fn find_by_scope(
            &self,
            key: &FrozenScopeKey,
        ) -> FrozenStoreResult<Option<FrozenSubmission>>;
        async fn list_for_phase_group(
            &self,
            phase_id: PhaseId,
            group_id: GroupId,
        ) -> FrozenStoreResult<Vec<FrozenSubmission>>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_failing_write_does_not_abort_sibling_tasks(harness: Harness) {
    let failing_task = seed_task(&harness, StudentId::new(), "Poisoned task").await;
    seed_task(&harness, StudentId::new(), "Healthy task one").await;
    seed_task(&harness, StudentId::new(), "Healthy task two").await;

    let failing_id: TaskId = failing_task.id();
    let mut flaky = MockFlakyFrozenStore::new();
    flaky.expect_insert().returning(move |snapshot| {
        if snapshot.task_id() == failing_id {
            Err(FrozenStoreError::persistence(std::io::Error::other(
                "connection reset",
            )))
        } else {
            Ok(())
        }
    });

    let freeze = FreezeService::new(
        Arc::clone(&harness.submissions),
        Arc::new(flaky),
        Arc::clone(&harness.tasks),
        Arc::new(DefaultClock),
    );

    let report = freeze
        .freeze_phase(harness.phase, harness.group, harness.leader)
        .await
        .expect("roster enumeration succeeds");

    assert_eq!(report.tasks().len(), 3);
    assert_eq!(report.created(), 2);
    assert_eq!(report.failed(), 1);
    let failed_report = report
        .tasks()
        .iter()
        .find(|entry| entry.outcome.is_failed())
        .expect("one failure reported");
    assert_eq!(failed_report.task_id, failing_id);
}
