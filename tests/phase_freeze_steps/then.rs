//! Then steps for phase freeze BDD scenarios.

use super::world::PhaseFreezeWorld;
use atelier::submission::domain::DisplayStatus;
use rstest_bdd_macros::then;

#[then("the freeze report counts {created:usize} created and {existing:usize} already frozen")]
fn report_counts(
    world: &PhaseFreezeWorld,
    created: usize,
    existing: usize,
) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing freeze report"))?;

    if report.created() != created || report.already_frozen() != existing {
        return Err(eyre::eyre!(
            "expected {created} created / {existing} already frozen, found {} / {}",
            report.created(),
            report.already_frozen()
        ));
    }
    if report.failed() != 0 {
        return Err(eyre::eyre!("unexpected failures in freeze report"));
    }
    Ok(())
}

#[then(r#"the frozen snapshot shows status "{status}""#)]
fn snapshot_status_is(world: &PhaseFreezeWorld, status: String) -> Result<(), eyre::Report> {
    let expected = DisplayStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let snapshot = world
        .stored_snapshot()?
        .ok_or_else(|| eyre::eyre!("missing frozen snapshot"))?;

    if snapshot.display_status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            snapshot.display_status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the frozen snapshot body is "{body}""#)]
fn snapshot_body_is(world: &PhaseFreezeWorld, body: String) -> Result<(), eyre::Report> {
    let snapshot = world
        .stored_snapshot()?
        .ok_or_else(|| eyre::eyre!("missing frozen snapshot"))?;

    if snapshot.body() != body {
        return Err(eyre::eyre!(
            "expected body {body:?}, found {:?}",
            snapshot.body()
        ));
    }
    Ok(())
}

#[then("the frozen snapshot provenance is the original submission")]
fn snapshot_provenance_is_original(world: &PhaseFreezeWorld) -> Result<(), eyre::Report> {
    let submission = world
        .submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission in scenario world"))?;
    let snapshot = world
        .stored_snapshot()?
        .ok_or_else(|| eyre::eyre!("missing frozen snapshot"))?;

    if snapshot.source_submission_id() != Some(submission.id()) {
        return Err(eyre::eyre!(
            "snapshot provenance does not reference the originating submission"
        ));
    }
    Ok(())
}
