//! Search query augmentation.
//!
//! Repository search must run over the full result set and return
//! repository-level matches, so queries without explicit `count:` or
//! `select:` modifiers get them appended. Word boundaries and digits are
//! ASCII-only, so `é` ends a `count:` token and non-ASCII digits are no count.

use regex::Regex;
use std::sync::LazyLock;

const COUNT_ALL: &str = " count:all";
const SELECT_REPO: &str = " select:repo";

#[expect(clippy::expect_used, reason = "pattern is a literal known to compile")]
static COUNT_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)count:([0-9]+|all)(?-u:\b)").expect("valid count pattern")
});

#[expect(clippy::expect_used, reason = "pattern is a literal known to compile")]
static SELECT_MODIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)select:(.+)(?-u:\b)").expect("valid select pattern"));

/// Appends ` count:all` unless the query already sets a count.
#[must_use]
pub fn with_default_count(query: &str) -> String {
    if COUNT_MODIFIER.is_match(query) {
        return query.to_owned();
    }
    format!("{query}{COUNT_ALL}")
}

/// Appends ` select:repo` unless the query already selects a result type.
#[must_use]
pub fn with_default_select(query: &str) -> String {
    if SELECT_MODIFIER.is_match(query) {
        return query.to_owned();
    }
    format!("{query}{SELECT_REPO}")
}

/// Applies both default modifiers.
///
/// # Examples
///
/// ```
/// use batch_targets::resolution::services::augment_query;
///
/// assert_eq!(augment_query("lang:go"), "lang:go count:all select:repo");
/// assert_eq!(augment_query("lang:go count:10"), "lang:go count:10 select:repo");
/// ```
#[must_use]
pub fn augment_query(query: &str) -> String {
    with_default_select(&with_default_count(query))
}
