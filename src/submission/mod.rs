//! Submission intake, review, resolution, and freezing for Atelier.
//!
//! This module owns the records a student's work passes through: original
//! submissions (direct attempts at a task), revision submissions (responses
//! to a revision request), and frozen snapshots captured when a group leader
//! finalizes a phase. The resolution algorithm in
//! [`domain::resolve`] picks the single authoritative submission for a
//! task/student pair; the freeze service persists it so later edits to live
//! rows cannot change what a grader sees. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
