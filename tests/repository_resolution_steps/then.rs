//! Then steps for repository resolution BDD scenarios.

use super::world::ResolutionWorld;
use batch_targets::resolution::domain::{Classification, ServiceType};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;

/// Assert a condition, returning an error with the given message if false.
fn assert_that(condition: bool, message: impl Into<String>) -> Result<(), eyre::Report> {
    if condition {
        Ok(())
    } else {
        Err(eyre!(message.into()))
    }
}

#[then("the resolution contains {count:usize} targets")]
fn resolution_contains(world: &ResolutionWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.resolution()?.revisions().len();
    assert_that(actual == count, format!("expected {count} targets, got {actual}"))
}

#[then(r#"the target "{name}" is on branch "{branch}""#)]
fn target_on_branch(world: &ResolutionWorld, name: String, branch: String) -> Result<(), eyre::Report> {
    let repo_id = world.repo(&name)?.id();
    let revision = world
        .resolution()?
        .revisions()
        .iter()
        .find(|revision| revision.repo_id() == repo_id)
        .ok_or_else(|| eyre!("no target for {name}"))?;
    assert_that(
        revision.branch() == Some(branch.as_str()),
        format!("expected branch {branch}, got {:?}", revision.branch()),
    )
}

#[then("no classification is reported")]
fn no_classification(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let classification = world.resolution()?.classification();
    assert_that(
        classification.is_none(),
        format!("unexpected classification: {classification:?}"),
    )
}

#[then(r#"the unsupported code hosts reported are "{types}""#)]
fn unsupported_reported(world: &ResolutionWorld, types: String) -> Result<(), eyre::Report> {
    let Some(Classification::Unsupported(unsupported)) = world.resolution()?.classification()
    else {
        return Err(eyre!("expected unsupported code hosts to be reported"));
    };
    let reported: Vec<&str> = unsupported
        .service_types()
        .into_iter()
        .map(ServiceType::as_str)
        .collect();
    assert_that(
        reported.join(", ") == types,
        format!("expected {types}, got {reported:?}"),
    )
}

#[then(r#"the ignored repositories reported are "{names}""#)]
fn ignored_reported(world: &ResolutionWorld, names: String) -> Result<(), eyre::Report> {
    let Some(Classification::Ignored(ignored)) = world.resolution()?.classification() else {
        return Err(eyre!("expected ignored repositories to be reported"));
    };
    let reported: Vec<&str> = ignored
        .repos()
        .iter()
        .map(|repo| repo.name().as_str())
        .collect();
    assert_that(
        reported.join(", ") == names,
        format!("expected {names}, got {reported:?}"),
    )
}

#[then(r#"resolution fails mentioning "{fragment}""#)]
fn resolution_fails(world: &ResolutionWorld, fragment: String) -> Result<(), eyre::Report> {
    match &world.outcome {
        Some(Err(err)) => assert_that(
            err.to_string().contains(&fragment),
            format!("expected error mentioning {fragment:?}, got {err}"),
        ),
        Some(Ok(_)) => Err(eyre!("expected resolution to fail")),
        None => Err(eyre!("targets have not been resolved")),
    }
}

#[then("no git revision lookups were made")]
fn no_revision_lookups(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let calls = world.git.revision_calls().wrap_err("read revision calls")?;
    assert_that(calls.is_empty(), format!("unexpected revision lookups: {calls:?}"))
}
