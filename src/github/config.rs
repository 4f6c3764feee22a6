//! Configuration for search operations.

/// Tuning knobs for the search service.
///
/// The page sizes mirror what the GitHub search endpoint is asked for per
/// request; `max_pages` bounds the cursor loop so a connection that never
/// reports a final page cannot spin forever.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Nodes requested per page of issue search results.
    pub issue_page_size: u32,
    /// Nodes requested per page of repository search results.
    pub repo_page_size: u32,
    /// Upper bound on pages fetched for a single operation.
    pub max_pages: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            issue_page_size: 100,
            repo_page_size: 5,
            max_pages: 50,
        }
    }
}
