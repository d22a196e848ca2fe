//! End-to-end resolution over the in-memory adapters.

use crate::in_memory::helpers::{Host, TestResult, host, runtime};
use batch_targets::resolution::{
    domain::{CommitId, Directive, RepoId, ResolutionOptions},
    ports::{SearchEvent, SearchMatch},
    services::{ResolutionError, ResolverConfig},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

#[rstest]
fn query_and_names_merge_into_one_target_per_repository(
    runtime: io::Result<Runtime>,
    host: Host,
) -> TestResult {
    let rt = runtime?;
    let widgets = host.repo(1, "acme/widgets", "github", "aaa111")?;
    let gadgets = host.repo(2, "acme/gadgets", "gitlab", "bbb222")?;
    host.search.respond(
        "lang:go count:all select:repo",
        [SearchEvent::Matches(vec![
            SearchMatch::Repo {
                repository_id: gadgets.id(),
            },
            SearchMatch::Repo {
                repository_id: widgets.id(),
            },
        ])],
    )?;

    let directives = vec![
        Directive::search("lang:go")?,
        Directive::repository("acme/widgets")?,
    ];
    let resolution = rt.block_on(host.service().resolve(
        &directives,
        ResolutionOptions::default(),
        &CancellationToken::new(),
    ))?;

    let ids: Vec<RepoId> = resolution.revisions().iter().map(|rev| rev.repo_id()).collect();
    assert_eq!(ids, vec![widgets.id(), gadgets.id()]);
    assert!(resolution.classification().is_none());
    Ok(())
}

#[rstest]
fn explicit_branch_overrides_default_branch(
    runtime: io::Result<Runtime>,
    host: Host,
) -> TestResult {
    let rt = runtime?;
    let widgets = host.repo(1, "acme/widgets", "github", "aaa111")?;
    host.git
        .set_ref(widgets.id(), "release", CommitId::new("ccc333")?)?;

    let directives = vec![
        Directive::repository("acme/widgets")?,
        Directive::repository_branch("acme/widgets", "release")?,
    ];
    let resolution = rt.block_on(host.service().resolve(
        &directives,
        ResolutionOptions::default(),
        &CancellationToken::new(),
    ))?;

    let [only] = resolution.revisions() else {
        return Err("expected exactly one revision".into());
    };
    assert_eq!(only.branch(), Some("release"));
    assert_eq!(only.commit().map(CommitId::as_str), Some("ccc333"));
    Ok(())
}

#[rstest]
fn sequential_config_resolves_the_same_targets(
    runtime: io::Result<Runtime>,
    host: Host,
) -> TestResult {
    let rt = runtime?;
    for id in 1..=6 {
        host.repo(id, &format!("acme/repo-{id}"), "github", &format!("c{id}"))?;
    }
    let directives: Vec<Directive> = (1..=6)
        .map(|id| Directive::repository(format!("acme/repo-{id}")))
        .collect::<Result<_, _>>()?;

    let service = host.service().with_config(ResolverConfig::sequential());
    let resolution = rt.block_on(service.resolve(
        &directives,
        ResolutionOptions::default(),
        &CancellationToken::new(),
    ))?;

    assert_eq!(resolution.revisions().len(), 6);
    assert_eq!(host.git.max_concurrent_stats(), 1);
    Ok(())
}

#[rstest]
fn first_failing_directive_is_reported(runtime: io::Result<Runtime>, host: Host) -> TestResult {
    let rt = runtime?;
    host.repo(1, "acme/widgets", "github", "aaa111")?;

    let directives = vec![
        Directive::repository_branch("acme/widgets", "nope")?,
        Directive::repository("acme/ghost")?,
    ];
    let result = rt.block_on(host.service().resolve(
        &directives,
        ResolutionOptions::default(),
        &CancellationToken::new(),
    ));

    let Err(err) = result else {
        return Err("expected resolution to fail".into());
    };
    assert!(matches!(err, ResolutionError::Directive { .. }));
    assert_eq!(
        err.to_string(),
        r#"resolving "repository:acme/widgets@nope": no branch matching "nope" found for repository acme/widgets"#
    );
    Ok(())
}
