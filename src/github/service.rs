//! The search service façade.
//!
//! `GitHubService` wires the query builder, paginator, and normalizer
//! together behind two memoized operations. Results are cached per query
//! signature for the lifetime of the instance; entries are write-once and
//! never refreshed, so an instance expecting fresh data for a seen key must
//! be recreated.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::{Mutex, OnceCell};

use crate::github::config::SearchConfig;
use crate::github::error::SearchResult;
use crate::github::transport::{GraphqlTransport, SearchTransport};
use crate::github::types::{Issue, Repository};
use crate::github::{normalize, paginate, query};

static ISSUES_QUERY: &str = include_str!("./queries/search_issues.graphql");
static REPOS_QUERY: &str = include_str!("./queries/search_repositories.graphql");

/// Per-key cache slot. The `OnceCell` doubles as the in-flight marker:
/// concurrent callers for the same key await the same initialization, so a
/// query is fetched at most once. A failed fetch leaves the cell empty and a
/// later call retries.
type CacheCell<T> = Arc<OnceCell<Arc<Vec<T>>>>;

/// GitHub search service with per-instance memoization.
pub struct GitHubService {
    transport: Arc<dyn SearchTransport>,
    config: SearchConfig,
    issues_cache: Mutex<HashMap<String, CacheCell<Issue>>>,
    repos_cache: Mutex<HashMap<String, CacheCell<Repository>>>,
}

impl GitHubService {
    /// Create a service authenticated with a personal access token.
    pub fn new(token: impl Into<String>) -> SearchResult<Self> {
        Self::with_config(token, SearchConfig::default())
    }

    /// Create a service with custom page sizes and pagination bound.
    pub fn with_config(token: impl Into<String>, config: SearchConfig) -> SearchResult<Self> {
        let transport = Arc::new(GraphqlTransport::new(token)?);
        Ok(Self::with_transport(transport, config))
    }

    /// Create a service over an arbitrary transport implementation.
    pub fn with_transport(transport: Arc<dyn SearchTransport>, config: SearchConfig) -> Self {
        Self {
            transport,
            config,
            issues_cache: Mutex::new(HashMap::new()),
            repos_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch open issues created after `since` from the given organizations
    /// and repositories, optionally restricted by labels.
    ///
    /// At least one of `orgs`/`repos` must be non-empty; that precondition is
    /// enforced at the caller boundary, not here.
    pub async fn get_issues(
        &self,
        orgs: &[String],
        repos: &[String],
        labels: &[String],
        since: DateTime<Utc>,
    ) -> SearchResult<Arc<Vec<Issue>>> {
        let key = query::issues_cache_key(orgs, repos, labels, since);
        let cell = {
            let mut cache = self.issues_cache.lock().await;
            cache.entry(key.clone()).or_default().clone()
        };
        if let Some(cached) = cell.get() {
            debug!("issue cache hit: {key}");
            return Ok(Arc::clone(cached));
        }

        let search_query = query::issues_search_query(orgs, repos, labels, since);
        cell.get_or_try_init(|| async {
            debug!("issue cache miss: {key}");
            let issues = paginate::fetch_all(
                self.transport.as_ref(),
                ISSUES_QUERY,
                &search_query,
                self.config.issue_page_size,
                self.config.max_pages,
                normalize::normalize_issues,
            )
            .await?;
            Ok(Arc::new(issues))
        })
        .await
        .cloned()
    }

    /// Fetch public, non-archived repositories pushed after `since` with at
    /// least one good first issue and more than 10 stars.
    ///
    /// Same caller-side precondition as [`GitHubService::get_issues`].
    pub async fn get_repos(
        &self,
        orgs: &[String],
        repos: &[String],
        since: DateTime<Utc>,
    ) -> SearchResult<Arc<Vec<Repository>>> {
        let key = query::repos_cache_key(orgs, repos, since);
        let cell = {
            let mut cache = self.repos_cache.lock().await;
            cache.entry(key.clone()).or_default().clone()
        };
        if let Some(cached) = cell.get() {
            debug!("repository cache hit: {key}");
            return Ok(Arc::clone(cached));
        }

        let search_query = query::repos_search_query(orgs, repos, since);
        cell.get_or_try_init(|| async {
            debug!("repository cache miss: {key}");
            let repositories = paginate::fetch_all(
                self.transport.as_ref(),
                REPOS_QUERY,
                &search_query,
                self.config.repo_page_size,
                self.config.max_pages,
                normalize::normalize_repos,
            )
            .await?;
            Ok(Arc::new(repositories))
        })
        .await
        .cloned()
    }
}
