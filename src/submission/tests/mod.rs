//! Unit tests for the submission module.
//!
//! Tests are organised by concern: domain invariants, the resolution
//! priority order, intake/review orchestration, and freeze orchestration.

mod freeze_service_tests;
mod intake_service_tests;
