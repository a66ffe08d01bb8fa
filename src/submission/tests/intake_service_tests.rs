//! Service orchestration tests for submission intake and review.

use std::sync::Arc;

use crate::submission::{
    adapters::memory::InMemorySubmissionStore,
    domain::{ReviewVerdict, SubmissionDomainError, SubmissionStatus},
    services::{
        ReviewRequest, SubmissionIntakeError, SubmissionIntakeService, SubmitOriginalRequest,
        SubmitRevisionRequest,
    },
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        AttemptLimit, GroupId, PhaseId, StudentId, Task, TaskDomainError, TaskDraft, TaskStatus,
    },
    ports::TaskRepository,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    SubmissionIntakeService<InMemorySubmissionStore, InMemoryTaskRepository, DefaultClock>;

struct Harness {
    service: TestService,
    tasks: Arc<InMemoryTaskRepository>,
}

#[fixture]
fn harness() -> Harness {
    let submissions = Arc::new(InMemorySubmissionStore::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service =
        SubmissionIntakeService::new(submissions, Arc::clone(&tasks), Arc::new(DefaultClock));
    Harness { service, tasks }
}

async fn seed_task(harness: &Harness, assignee: StudentId, max_attempts: u32) -> Task {
    let draft = TaskDraft::new(
        PhaseId::new(),
        GroupId::new(),
        assignee,
        "Design the schema",
        AttemptLimit::new(max_attempts).expect("valid limit"),
    )
    .expect("valid draft");
    let task = Task::new(draft, &DefaultClock);
    harness.tasks.store(&task).await.expect("task stored");
    task
}

async fn task_status(harness: &Harness, task: &Task) -> TaskStatus {
    harness
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists")
        .status()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submit_original_stores_row_and_moves_task_to_submitted(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    let submission = harness
        .service
        .submit_original(
            SubmitOriginalRequest::new(task.id(), assignee, "Schema v1")
                .with_file_refs(vec!["schema/v1.sql".to_owned()]),
        )
        .await
        .expect("submission accepted");

    assert_eq!(submission.attempt().value(), 1);
    assert_eq!(submission.status(), SubmissionStatus::Pending);
    assert_eq!(task_status(&harness, &task).await, TaskStatus::Submitted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resubmission_consumes_the_next_attempt_ordinal(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "First"))
        .await
        .expect("first accepted");
    let second = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Second"))
        .await
        .expect("second accepted");

    assert_eq!(second.attempt().value(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attempt_budget_is_enforced(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, 1).await;

    harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Only"))
        .await
        .expect("first accepted");
    let result = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Extra"))
        .await;

    assert!(matches!(
        result,
        Err(SubmissionIntakeError::TaskDomain(
            TaskDomainError::AttemptLimitReached { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_assignee_may_submit(harness: Harness) {
    let task = seed_task(&harness, StudentId::new(), 3).await;
    let interloper = StudentId::new();

    let result = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), interloper, "Mine now"))
        .await;

    assert!(matches!(
        result,
        Err(SubmissionIntakeError::TaskDomain(
            TaskDomainError::NotAssignee { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_request_review_moves_task_to_revise(harness: Harness) {
    let assignee = StudentId::new();
    let leader = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    let submission = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Draft"))
        .await
        .expect("submission accepted");
    let reviewed = harness
        .service
        .review_original(
            submission.id(),
            ReviewRequest::new(leader, ReviewVerdict::RequestRevision)
                .with_comments("Split the tables"),
        )
        .await
        .expect("review recorded");

    assert_eq!(reviewed.status(), SubmissionStatus::RevisionRequested);
    assert_eq!(task_status(&harness, &task).await, TaskStatus::ToRevise);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_completes_the_task(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    let submission = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Final"))
        .await
        .expect("submission accepted");
    harness
        .service
        .review_original(
            submission.id(),
            ReviewRequest::new(StudentId::new(), ReviewVerdict::Approve),
        )
        .await
        .expect("review recorded");

    assert_eq!(task_status(&harness, &task).await, TaskStatus::Completed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_leaves_the_task_submitted(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    let submission = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Weak"))
        .await
        .expect("submission accepted");
    harness
        .service
        .review_original(
            submission.id(),
            ReviewRequest::new(StudentId::new(), ReviewVerdict::Reject),
        )
        .await
        .expect("review recorded");

    // The attempt budget, not the status, governs whether a retry is
    // possible.
    assert_eq!(task_status(&harness, &task).await, TaskStatus::Submitted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revisions_require_an_outstanding_request(harness: Harness) {
    let assignee = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    let submission = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Draft"))
        .await
        .expect("submission accepted");
    let result = harness
        .service
        .submit_revision(SubmitRevisionRequest::new(
            submission.id(),
            assignee,
            "Premature revision",
        ))
        .await;

    assert!(matches!(
        result,
        Err(SubmissionIntakeError::Domain(
            SubmissionDomainError::RevisionNotRequested(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revision_ordinals_increase_monotonically(harness: Harness) {
    let assignee = StudentId::new();
    let leader = StudentId::new();
    let task = seed_task(&harness, assignee, 3).await;

    let submission = harness
        .service
        .submit_original(SubmitOriginalRequest::new(task.id(), assignee, "Draft"))
        .await
        .expect("submission accepted");
    harness
        .service
        .review_original(
            submission.id(),
            ReviewRequest::new(leader, ReviewVerdict::RequestRevision),
        )
        .await
        .expect("review recorded");

    let first = harness
        .service
        .submit_revision(SubmitRevisionRequest::new(
            submission.id(),
            assignee,
            "Revision one",
        ))
        .await
        .expect("revision accepted");
    assert_eq!(first.revision().value(), 1);
    assert_eq!(task_status(&harness, &task).await, TaskStatus::Submitted);

    harness
        .service
        .review_revision(
            first.id(),
            ReviewRequest::new(leader, ReviewVerdict::RequestRevision),
        )
        .await
        .expect("second request recorded");
    let second = harness
        .service
        .submit_revision(SubmitRevisionRequest::new(
            submission.id(),
            assignee,
            "Revision two",
        ))
        .await
        .expect("second revision accepted");

    assert_eq!(second.revision().value(), 2);
    assert!(second.submitted_at() >= first.submitted_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tasks_are_reported(harness: Harness) {
    let result = harness
        .service
        .submit_original(SubmitOriginalRequest::new(
            crate::task::domain::TaskId::new(),
            StudentId::new(),
            "Orphan",
        ))
        .await;

    assert!(matches!(
        result,
        Err(SubmissionIntakeError::TaskNotFound(_))
    ));
}
