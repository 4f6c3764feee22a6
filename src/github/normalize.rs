//! Normalization of raw search nodes into domain entities.
//!
//! The search endpoint returns loosely-typed nodes: optional fields, ISO-8601
//! date strings, nested connections. Normalization is total — a node is only
//! ever dropped, never an error. Nodes without an `id` (inaccessible or
//! malformed) are skipped silently.

use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::github::types::{Issue, Label, Language, Repository, UserRef};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawRepository {
    id: Option<String>,
    name: String,
    name_with_owner: String,
    description: Option<String>,
    url: String,
    stargazer_count: u64,
    fork_count: u64,
    primary_language: Option<Language>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    pushed_at: Option<DateTime<Utc>>,
    owner: UserRef,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawCommentConnection {
    total_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLabelConnection {
    nodes: Vec<Label>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawIssue {
    id: Option<String>,
    number: u64,
    title: String,
    body: Option<String>,
    url: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    author: Option<UserRef>,
    comments: RawCommentConnection,
    labels: Option<RawLabelConnection>,
    repository: Option<RawRepository>,
}

fn epoch_ms(ts: Option<DateTime<Utc>>) -> i64 {
    ts.map(|t| t.timestamp_millis()).unwrap_or(0)
}

fn into_repository(raw: RawRepository) -> Repository {
    Repository {
        id: raw.id.unwrap_or_default(),
        name: raw.name,
        name_with_owner: raw.name_with_owner,
        description: raw.description,
        url: raw.url,
        stargazer_count: raw.stargazer_count,
        fork_count: raw.fork_count,
        primary_language: raw.primary_language,
        created_at: epoch_ms(raw.created_at),
        updated_at: epoch_ms(raw.updated_at),
        pushed_at: epoch_ms(raw.pushed_at),
        owner: raw.owner,
    }
}

/// Normalize one page of repository search nodes, dropping nodes without an
/// `id`.
pub(crate) fn normalize_repos(nodes: Vec<Value>) -> Vec<Repository> {
    nodes
        .into_iter()
        .filter_map(|node| match serde_json::from_value::<RawRepository>(node) {
            Ok(raw) if raw.id.is_some() => Some(into_repository(raw)),
            Ok(_) => {
                debug!("skipping repository node without id");
                None
            }
            Err(err) => {
                debug!("skipping malformed repository node: {err}");
                None
            }
        })
        .collect()
}

/// Normalize one page of issue search nodes: drops nodes without an `id`,
/// substitutes the ghost sentinel for missing authors, flattens labels,
/// reduces comments to a count, and normalizes the embedded repository.
pub(crate) fn normalize_issues(nodes: Vec<Value>) -> Vec<Issue> {
    nodes
        .into_iter()
        .filter_map(|node| match serde_json::from_value::<RawIssue>(node) {
            Ok(raw) => raw.id.clone().map(|id| Issue {
                id,
                number: raw.number,
                title: raw.title,
                body: raw.body.unwrap_or_default(),
                url: raw.url,
                created_at: epoch_ms(raw.created_at),
                updated_at: epoch_ms(raw.updated_at),
                author: raw.author.unwrap_or_else(UserRef::ghost),
                comments_count: raw.comments.total_count,
                labels: raw.labels.map(|l| l.nodes).unwrap_or_default(),
                repository: raw.repository.map(into_repository).unwrap_or_default(),
            }),
            Err(err) => {
                debug!("skipping malformed issue node: {err}");
                None
            }
        })
        .collect()
}
