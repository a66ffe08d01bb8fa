//! Orchestration services for submission intake and phase freezing.

mod freeze;
mod intake;

pub use freeze::{
    FreezeOutcome, FreezeService, FreezeServiceError, FreezeServiceResult, FreezeTaskError,
    PhaseFreezeReport, TaskFreezeReport,
};
pub use intake::{
    ReviewRequest, SubmissionIntakeError, SubmissionIntakeResult, SubmissionIntakeService,
    SubmitOriginalRequest, SubmitRevisionRequest,
};
