//! Orchestration services for task assignment.

mod assignment;

pub use assignment::{
    AssignTaskRequest, TaskAssignmentError, TaskAssignmentResult, TaskAssignmentService,
};
