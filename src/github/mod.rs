//! GitHub GraphQL search service layer.
//!
//! Query construction, cursor pagination, payload normalization, and
//! per-signature memoization live here; console output and JSON export are
//! thin consumers at the crate root.

pub mod config;
pub mod error;
pub mod service;
pub mod transport;
pub mod types;

// Internal building blocks of the service façade
pub(crate) mod normalize;
pub(crate) mod paginate;
pub(crate) mod query;

// Re-export service types
pub use config::SearchConfig;
pub use error::{SearchError, SearchResult};
pub use service::GitHubService;
pub use transport::{GraphqlTransport, SearchTransport};

// Re-export domain and wire types
pub use types::{Issue, Label, Language, PageInfo, Repository, SearchConnection, UserRef};
