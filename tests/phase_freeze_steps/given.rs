//! Given steps for phase freeze BDD scenarios.

use super::world::{PhaseFreezeWorld, run_async};
use atelier::submission::{
    domain::ReviewVerdict,
    services::{ReviewRequest, SubmitOriginalRequest, SubmitRevisionRequest},
};
use atelier::task::services::AssignTaskRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a phase task assigned to a student")]
fn phase_task_assigned(world: &mut PhaseFreezeWorld) -> Result<(), eyre::Report> {
    let request = AssignTaskRequest::new(
        world.phase,
        world.group,
        world.student,
        "Deliver the phase artefact",
    );
    let task = run_async(world.assignment.assign(request))
        .wrap_err("assign task for freeze scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"the student has submitted "{body}""#)]
fn student_has_submitted(world: &mut PhaseFreezeWorld, body: String) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let submission = run_async(
        world
            .intake
            .submit_original(SubmitOriginalRequest::new(task.id(), world.student, body)),
    )
    .wrap_err("submit original for freeze scenario")?;
    world.submission = Some(submission);
    Ok(())
}

#[given("the leader has requested a revision")]
fn leader_requested_revision(world: &mut PhaseFreezeWorld) -> Result<(), eyre::Report> {
    let submission = world
        .submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission in scenario world"))?;
    let reviewed = run_async(world.intake.review_original(
        submission.id(),
        ReviewRequest::new(world.leader, ReviewVerdict::RequestRevision),
    ))
    .wrap_err("request revision for freeze scenario")?;
    world.submission = Some(reviewed);
    Ok(())
}

#[given(r#"the student has submitted the revision "{body}""#)]
fn student_submitted_revision(
    world: &mut PhaseFreezeWorld,
    body: String,
) -> Result<(), eyre::Report> {
    let submission = world
        .submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission in scenario world"))?;
    let revision = run_async(world.intake.submit_revision(SubmitRevisionRequest::new(
        submission.id(),
        world.student,
        body,
    )))
    .wrap_err("submit revision for freeze scenario")?;
    world.revision = Some(revision);
    Ok(())
}

#[given("the phase has already been frozen")]
fn phase_already_frozen(world: &mut PhaseFreezeWorld) -> Result<(), eyre::Report> {
    let report = run_async(
        world
            .freeze
            .freeze_phase(world.phase, world.group, world.leader),
    )
    .wrap_err("pre-freeze phase for scenario setup")?;
    if report.failed() > 0 {
        return Err(eyre::eyre!("scenario setup freeze reported failures"));
    }
    Ok(())
}
