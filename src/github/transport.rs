//! GraphQL transport for the search service.
//!
//! `SearchTransport` is the seam the paginator talks through; the production
//! implementation posts to the GitHub GraphQL endpoint via octocrab. Tests
//! substitute a scripted implementation.

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::Value;

use crate::github::error::{SearchError, SearchResult};
use crate::github::types::{GraphqlResponse, SearchConnection};

/// Executes one GraphQL search request and returns the raw page.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Post `document` with `variables` and extract the `data.search`
    /// connection from the response.
    async fn search(&self, document: &str, variables: Value) -> SearchResult<SearchConnection>;
}

/// Production transport backed by an authenticated octocrab client.
#[derive(Debug)]
pub struct GraphqlTransport {
    inner: Octocrab,
}

impl GraphqlTransport {
    /// Build a transport authenticated with a personal access token.
    pub fn new(token: impl Into<String>) -> SearchResult<Self> {
        let inner = Octocrab::builder()
            .personal_token(token.into())
            .build()
            .map_err(|e| SearchError::ClientSetup(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl SearchTransport for GraphqlTransport {
    async fn search(&self, document: &str, variables: Value) -> SearchResult<SearchConnection> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });
        let response: GraphqlResponse = self.inner.post("graphql", Some(&body)).await?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SearchError::Graphql(joined));
        }

        response
            .data
            .and_then(|d| d.search)
            .ok_or_else(|| SearchError::MalformedResponse("response missing data.search".into()))
    }
}
