//! Atelier: project/course coordination platform core.
//!
//! This crate provides the domain core for coordinating course projects:
//! tasks assigned to students within project phases, original and revision
//! submissions reviewed by group leaders, and the resolution + freeze engine
//! that snapshots a student's authoritative submission when a leader
//! finalizes a phase.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task assignment and lifecycle tracking
//! - [`submission`]: Submission intake, review, resolution, and freezing

pub mod submission;
pub mod task;
