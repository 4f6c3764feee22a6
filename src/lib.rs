//! `gh_issues` - GitHub issue and repository search over the GraphQL API
//!
//! This library queries GitHub's GraphQL search endpoint for open issues and
//! active repositories matching organization/repository/label/date filters,
//! paginates through result sets, normalizes the raw payloads into a uniform
//! domain model, and memoizes results per distinct query signature within a
//! service instance.

// Module declarations
pub mod export;
pub mod github;
pub mod render;

// Re-export the service façade and its configuration
pub use github::{GitHubService, SearchConfig};

// Re-export error types
pub use github::{SearchError, SearchResult};

// Re-export the transport seam
pub use github::{GraphqlTransport, SearchTransport};

// Re-export domain and wire types
pub use github::{Issue, Label, Language, PageInfo, Repository, SearchConnection, UserRef};

// Re-export export envelope types
pub use export::{ExportMetadata, QueryEcho};
