//! JSON file export with a metadata envelope.
//!
//! Pure serialization of the domain entities: the envelope records when the
//! export ran and which query parameters produced it.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::github::types::{Issue, Repository};

/// The query parameters echoed back into an export file.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEcho {
    pub orgs: Vec<String>,
    pub repos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub since: String,
}

/// Envelope metadata: export timestamp plus the echoed query.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub timestamp: String,
    pub query: QueryEcho,
}

impl ExportMetadata {
    fn now(query: QueryEcho) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            query,
        }
    }
}

#[derive(Serialize)]
struct IssuesDocument<'a> {
    metadata: ExportMetadata,
    issues: &'a [Issue],
}

#[derive(Serialize)]
struct ReposDocument<'a> {
    metadata: ExportMetadata,
    repositories: &'a [Repository],
}

/// Write issues to `path` as pretty-printed JSON.
pub fn export_issues(path: &Path, issues: &[Issue], query: QueryEcho) -> std::io::Result<()> {
    let document = IssuesDocument {
        metadata: ExportMetadata::now(query),
        issues,
    };
    fs::write(path, serde_json::to_string_pretty(&document)?)
}

/// Write repositories to `path` as pretty-printed JSON.
pub fn export_repos(path: &Path, repos: &[Repository], query: QueryEcho) -> std::io::Result<()> {
    let document = ReposDocument {
        metadata: ExportMetadata::now(query),
        repositories: repos,
    };
    fs::write(path, serde_json::to_string_pretty(&document)?)
}
