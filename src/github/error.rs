//! Error types for GitHub search operations.

use thiserror::Error;

/// Errors surfaced by the search service.
///
/// A search operation either succeeds with every page fetched and normalized,
/// or fails with one of these; partial pages are never returned.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport or HTTP failure from the underlying client
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Errors reported in the GraphQL response body
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// Response body did not match the expected search shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Pagination safety bound reached before the API reported a final page
    #[error("page limit exceeded after {pages} pages")]
    PageLimitExceeded { pages: u32 },

    /// Client setup/configuration error
    #[error("client setup failed: {0}")]
    ClientSetup(String),
}

/// Convenience result alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
