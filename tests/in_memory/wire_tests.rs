//! Tests for reading `on` entries from batch spec JSON.

use batch_targets::resolution::domain::{Directive, OnEntry, ResolutionDomainError};
use rstest::rstest;

fn parse(json: &str) -> Result<Vec<Directive>, Box<dyn std::error::Error + Send + Sync>> {
    let entries: Vec<OnEntry> = serde_json::from_str(json)?;
    Ok(Directive::parse_all(entries)?)
}

#[rstest]
fn mixed_entries_keep_their_order() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directives = parse(
        r#"[
            {"repositoriesMatchingQuery": "lang:go"},
            {"repository": "acme/widgets"},
            {"repository": "acme/gadgets", "branch": "release"}
        ]"#,
    )?;

    let rendered: Vec<String> = directives.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "lang:go",
            "repository:acme/widgets",
            "repository:acme/gadgets@release",
        ]
    );
    Ok(())
}

#[rstest]
#[case::empty_object(r#"[{}]"#)]
#[case::query_and_repository(r#"[{"repositoriesMatchingQuery": "x", "repository": "acme/w"}]"#)]
#[case::branch_without_repository(r#"[{"branch": "main"}]"#)]
#[case::blank_repository(r#"[{"repository": "  "}]"#)]
fn malformed_entries_are_rejected(#[case] json: &str) {
    let entries: Vec<OnEntry> = serde_json::from_str(json).expect("json should deserialize");
    assert_eq!(
        Directive::parse_all(entries),
        Err(ResolutionDomainError::MalformedDirective)
    );
}

#[rstest]
fn blank_branch_is_treated_as_absent() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directives = parse(r#"[{"repository": "acme/widgets", "branch": ""}]"#)?;
    assert_eq!(directives, vec![Directive::repository("acme/widgets")?]);
    Ok(())
}

#[rstest]
fn entries_serialize_without_absent_fields() -> Result<(), serde_json::Error> {
    let entry = OnEntry {
        repository: Some("acme/widgets".to_owned()),
        ..OnEntry::default()
    };
    assert_eq!(serde_json::to_string(&entry)?, r#"{"repository":"acme/widgets"}"#);
    Ok(())
}
