//! Reporting of repositories excluded from a resolution.

use crate::in_memory::helpers::{Host, TestResult, host, runtime};
use batch_targets::resolution::{
    domain::{Classification, ClassificationError, CommitId, Directive, ResolutionOptions},
    ports::FileKind,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

fn all_three(host: &Host) -> TestResult<Vec<Directive>> {
    host.repo(1, "acme/widgets", "github", "aaa111")?;
    host.repo(2, "acme/legacy", "gitea", "bbb222")?;
    let ignored = host.repo(3, "acme/vendored", "gitlab", "ccc333")?;
    host.git.add_file(
        ignored.id(),
        CommitId::new("ccc333")?,
        ".batchignore",
        FileKind::Regular,
    )?;
    Ok(vec![
        Directive::repository("acme/widgets")?,
        Directive::repository("acme/legacy")?,
        Directive::repository("acme/vendored")?,
    ])
}

#[rstest]
fn unsupported_hosts_are_reported_before_ignored_repositories(
    runtime: io::Result<Runtime>,
    host: Host,
) -> TestResult {
    let rt = runtime?;
    let directives = all_three(&host)?;

    let resolution = rt.block_on(host.service().resolve(
        &directives,
        ResolutionOptions::default(),
        &CancellationToken::new(),
    ))?;
    let (revisions, error) = resolution.into_parts();

    assert_eq!(revisions.len(), 1);
    let Some(ClassificationError::Unsupported(unsupported)) = error else {
        return Err("expected unsupported repositories to be reported".into());
    };
    assert_eq!(
        unsupported.to_string(),
        "found repositories on unsupported code hosts: gitea\nrepositories:\n\tacme/legacy"
    );
    Ok(())
}

#[rstest]
fn ignored_repositories_surface_once_unsupported_are_allowed(
    runtime: io::Result<Runtime>,
    host: Host,
) -> TestResult {
    let rt = runtime?;
    let directives = all_three(&host)?;

    let resolution = rt.block_on(host.service().resolve(
        &directives,
        ResolutionOptions::default().with_allow_unsupported(true),
        &CancellationToken::new(),
    ))?;

    assert_eq!(resolution.revisions().len(), 2);
    let Some(Classification::Ignored(ignored)) = resolution.classification() else {
        return Err("expected ignored repositories to be reported".into());
    };
    assert_eq!(
        ignored.to_string(),
        "found repositories containing .batchignore files:\n\tacme/vendored"
    );
    Ok(())
}

#[rstest]
fn permissive_options_keep_every_repository(
    runtime: io::Result<Runtime>,
    host: Host,
) -> TestResult {
    let rt = runtime?;
    let directives = all_three(&host)?;

    let resolution = rt.block_on(host.service().resolve(
        &directives,
        ResolutionOptions::default()
            .with_allow_unsupported(true)
            .with_allow_ignored(true),
        &CancellationToken::new(),
    ))?;

    assert_eq!(resolution.revisions().len(), 3);
    assert!(resolution.classification().is_none());
    Ok(())
}
