//! When steps for phase freeze BDD scenarios.

use super::world::{PhaseFreezeWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the leader freezes the phase")]
fn leader_freezes_phase(world: &mut PhaseFreezeWorld) -> Result<(), eyre::Report> {
    let report = run_async(
        world
            .freeze
            .freeze_phase(world.phase, world.group, world.leader),
    )
    .wrap_err("freeze phase")?;
    world.last_report = Some(report);
    Ok(())
}
