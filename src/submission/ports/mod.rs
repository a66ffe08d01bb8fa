//! Port contracts for submission and snapshot persistence.

mod frozen_store;
mod submission_store;

pub use frozen_store::{FrozenStoreError, FrozenStoreResult, FrozenSubmissionStore};
pub use submission_store::{SubmissionStore, SubmissionStoreError, SubmissionStoreResult};
