//! Shared world state for phase freeze BDD scenarios.

use std::sync::Arc;

use atelier::submission::{
    adapters::memory::{InMemoryFrozenSubmissionStore, InMemorySubmissionStore},
    domain::{FrozenScopeKey, FrozenSubmission, OriginalSubmission, RevisionSubmission},
    ports::FrozenSubmissionStore,
    services::{FreezeService, PhaseFreezeReport, SubmissionIntakeService},
};
use atelier::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{GroupId, PhaseId, StudentId, Task},
    services::TaskAssignmentService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Intake service type used by the BDD world.
pub type TestIntakeService =
    SubmissionIntakeService<InMemorySubmissionStore, InMemoryTaskRepository, DefaultClock>;

/// Freeze service type used by the BDD world.
pub type TestFreezeService = FreezeService<
    InMemorySubmissionStore,
    InMemoryFrozenSubmissionStore,
    InMemoryTaskRepository,
    DefaultClock,
>;

/// Assignment service type used by the BDD world.
pub type TestAssignmentService = TaskAssignmentService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for phase freeze behaviour tests.
pub struct PhaseFreezeWorld {
    pub assignment: TestAssignmentService,
    pub intake: TestIntakeService,
    pub freeze: TestFreezeService,
    pub frozen: Arc<InMemoryFrozenSubmissionStore>,
    pub phase: PhaseId,
    pub group: GroupId,
    pub leader: StudentId,
    pub student: StudentId,
    pub task: Option<Task>,
    pub submission: Option<OriginalSubmission>,
    pub revision: Option<RevisionSubmission>,
    pub last_report: Option<PhaseFreezeReport>,
}

impl PhaseFreezeWorld {
    /// Creates a world with fresh in-memory stores and empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let submissions = Arc::new(InMemorySubmissionStore::new());
        let frozen = Arc::new(InMemoryFrozenSubmissionStore::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);

        Self {
            assignment: TaskAssignmentService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            intake: SubmissionIntakeService::new(
                Arc::clone(&submissions),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            freeze: FreezeService::new(submissions, Arc::clone(&frozen), tasks, clock),
            frozen,
            phase: PhaseId::new(),
            group: GroupId::new(),
            leader: StudentId::new(),
            student: StudentId::new(),
            task: None,
            submission: None,
            revision: None,
            last_report: None,
        }
    }

    /// Returns the frozen snapshot for the scenario's task, if any.
    pub fn stored_snapshot(&self) -> Result<Option<FrozenSubmission>, eyre::Report> {
        let task = self
            .task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        let key = FrozenScopeKey {
            phase_id: self.phase,
            task_id: task.id(),
            student: task.assignee(),
            group_id: self.group,
        };
        run_async(self.frozen.find_by_scope(&key)).map_err(|err| eyre::eyre!("{err}"))
    }
}

impl Default for PhaseFreezeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PhaseFreezeWorld {
    PhaseFreezeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
