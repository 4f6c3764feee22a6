//! Search-query assembly and cache-key derivation.
//!
//! Pure string manipulation: the org/repo fragment, the mode-specific filter
//! suffixes, and the memoization keys the service caches under. Caller order
//! is preserved in the query string; cache keys canonicalize it by sorting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Backslash-escape characters that would break out of a quoted search term.
pub(crate) fn escape_term(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Build the `org:A org:B repo:C/D` fragment. Either group may be empty and
/// is then omitted entirely; no deduplication is performed.
pub(crate) fn build_search_query(orgs: &[String], repos: &[String]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(orgs.len() + repos.len());
    for org in orgs {
        parts.push(format!("org:{}", escape_term(org)));
    }
    for repo in repos {
        parts.push(format!("repo:{}", escape_term(repo)));
    }
    parts.join(" ")
}

/// Build the `label:"a","b"` filter, each label individually quoted.
/// Empty input yields an empty string.
pub(crate) fn label_filter(labels: &[String]) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let quoted: Vec<String> = labels
        .iter()
        .map(|l| format!("\"{}\"", escape_term(l)))
        .collect();
    format!("label:{}", quoted.join(","))
}

/// Full search string for the issue operation: open issues only, optionally
/// restricted by labels, created after the bound.
pub(crate) fn issues_search_query(
    orgs: &[String],
    repos: &[String],
    labels: &[String],
    since: DateTime<Utc>,
) -> String {
    let fragment = build_search_query(orgs, repos);
    let labels = label_filter(labels);
    let mut query = format!("{fragment} is:open is:issue");
    if !labels.is_empty() {
        query.push(' ');
        query.push_str(&labels);
    }
    query.push_str(&format!(
        " created:>{} sort:created",
        since.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    query
}

/// Full search string for the repository operation: public, non-archived,
/// with at least one good first issue and more than 10 stars, pushed after
/// the bound.
pub(crate) fn repos_search_query(
    orgs: &[String],
    repos: &[String],
    since: DateTime<Utc>,
) -> String {
    format!(
        "{} is:public archived:false good-first-issues:>0 stars:>10 pushed:>{} sort:created",
        build_search_query(orgs, repos),
        since.format("%Y-%m-%d")
    )
}

fn sorted_joined(list: &[String]) -> String {
    let mut sorted = list.to_vec();
    sorted.sort();
    sorted.join(",")
}

/// Cache key for an issue query. Filter lists are sorted first so the same
/// logical filter set maps to the same key regardless of caller order.
pub(crate) fn issues_cache_key(
    orgs: &[String],
    repos: &[String],
    labels: &[String],
    since: DateTime<Utc>,
) -> String {
    format!(
        "issues-since:{}-orgs:{}-repos:{}-labels:{}",
        since.to_rfc3339_opts(SecondsFormat::Secs, true),
        sorted_joined(orgs),
        sorted_joined(repos),
        sorted_joined(labels),
    )
}

/// Cache key for a repository query.
pub(crate) fn repos_cache_key(orgs: &[String], repos: &[String], since: DateTime<Utc>) -> String {
    format!(
        "repos-since:{}-orgs:{}-repos:{}",
        since.format("%Y-%m-%d"),
        sorted_joined(orgs),
        sorted_joined(repos),
    )
}
