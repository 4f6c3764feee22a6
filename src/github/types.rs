//! Domain and wire types for GitHub search operations.
//!
//! Domain entities serialize with camelCase field names so exported JSON
//! mirrors the GitHub API payloads they were normalized from. All timestamps
//! are epoch milliseconds.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GitHub user reference as it appears on issues and repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRef {
    pub id: String,
    pub login: String,
    pub avatar_url: String,
    pub url: String,
}

lazy_static! {
    /// Sentinel substituted for issues whose author account was deleted.
    /// Every substitution yields this exact value.
    static ref GHOST_USER: UserRef = UserRef {
        id: "ghost".to_string(),
        login: "Deleted user".to_string(),
        avatar_url: "https://avatars.githubusercontent.com/u/10137?v=4".to_string(),
        url: "https://github.com/ghost".to_string(),
    };
}

impl UserRef {
    /// The fixed placeholder user for deleted accounts.
    pub fn ghost() -> UserRef {
        GHOST_USER.clone()
    }
}

/// An issue label, flattened to the pair the search payload carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub name: String,
    pub color: String,
}

/// A repository's primary language descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub color: Option<String>,
}

/// A normalized repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub name_with_owner: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<Language>,
    pub created_at: i64,
    pub updated_at: i64,
    pub pushed_at: i64,
    pub owner: UserRef,
}

/// A normalized issue, carrying its owning repository embedded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub body: String,
    pub url: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub author: UserRef,
    pub comments_count: u64,
    pub labels: Vec<Label>,
    pub repository: Repository,
}

/// Cursor state for one page of a search connection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of raw search results. Nodes stay loosely typed until the
/// normalizer shapes them; a node the API could not resolve comes back as
/// an empty object here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConnection {
    pub nodes: Vec<Value>,
    pub page_info: PageInfo,
}

/// Toplevel GraphQL response envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GraphqlResponse {
    pub data: Option<SearchData>,
    pub errors: Option<Vec<GraphqlErrorItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    pub search: Option<SearchConnection>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlErrorItem {
    #[serde(default)]
    pub message: String,
}
