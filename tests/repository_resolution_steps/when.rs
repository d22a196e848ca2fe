//! When steps for repository resolution BDD scenarios.

use super::world::{ResolutionWorld, run_async};
use batch_targets::resolution::domain::ResolutionOptions;
use rstest_bdd_macros::when;
use tokio_util::sync::CancellationToken;

fn resolve_with(world: &mut ResolutionWorld, options: ResolutionOptions) {
    let cancel = CancellationToken::new();
    let outcome = run_async(world.service.resolve(&world.directives, options, &cancel));
    world.outcome = Some(outcome);
}

#[when("the targets are resolved")]
fn targets_resolved(world: &mut ResolutionWorld) {
    resolve_with(world, ResolutionOptions::default());
}

#[when("the targets are resolved allowing unsupported code hosts")]
fn targets_resolved_allowing_unsupported(world: &mut ResolutionWorld) {
    resolve_with(world, ResolutionOptions::default().with_allow_unsupported(true));
}
