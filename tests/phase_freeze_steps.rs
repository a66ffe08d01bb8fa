//! Behaviour tests for phase freeze orchestration.

#[path = "phase_freeze_steps/mod.rs"]
mod phase_freeze_steps_defs;

use phase_freeze_steps_defs::world::{PhaseFreezeWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/phase_freeze.feature",
    name = "Freeze a phase with a pending original submission"
)]
#[tokio::test(flavor = "multi_thread")]
async fn freeze_pending_original(world: PhaseFreezeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/phase_freeze.feature",
    name = "Freezing captures the latest revision"
)]
#[tokio::test(flavor = "multi_thread")]
async fn freeze_latest_revision(world: PhaseFreezeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/phase_freeze.feature",
    name = "Refreezing a phase leaves the snapshot untouched"
)]
#[tokio::test(flavor = "multi_thread")]
async fn refreeze_is_rejected(world: PhaseFreezeWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/phase_freeze.feature",
    name = "An unworked task freezes a placeholder snapshot"
)]
#[tokio::test(flavor = "multi_thread")]
async fn freeze_unworked_task(world: PhaseFreezeWorld) {
    let _ = world;
}
