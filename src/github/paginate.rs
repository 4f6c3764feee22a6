//! Cursor-driven fetch loop over the search connection.

use log::debug;
use serde_json::{Value, json};

use crate::github::error::{SearchError, SearchResult};
use crate::github::transport::SearchTransport;

/// Fetch every page of a search, normalizing and accumulating as pages
/// arrive. The cursor is absent on the first request and bound to the
/// previous page's `endCursor` afterwards; termination is API-driven via
/// `pageInfo.hasNextPage`, with `max_pages` as a safety bound.
///
/// Any transport error aborts the whole operation; pages already fetched
/// are discarded.
pub(crate) async fn fetch_all<T, F>(
    transport: &dyn SearchTransport,
    document: &str,
    search_query: &str,
    page_size: u32,
    max_pages: u32,
    normalize: F,
) -> SearchResult<Vec<T>>
where
    F: Fn(Vec<Value>) -> Vec<T>,
{
    let mut results = Vec::new();
    let mut cursor: Option<String> = None;

    for page in 0..max_pages {
        let variables = json!({
            "searchQuery": search_query,
            "first": page_size,
            "after": cursor,
        });
        let connection = transport.search(document, variables).await?;
        debug!(
            "fetched page {} with {} nodes (hasNextPage: {})",
            page + 1,
            connection.nodes.len(),
            connection.page_info.has_next_page
        );
        results.extend(normalize(connection.nodes));

        if !connection.page_info.has_next_page {
            return Ok(results);
        }
        cursor = Some(connection.page_info.end_cursor.ok_or_else(|| {
            SearchError::MalformedResponse("hasNextPage set but endCursor missing".into())
        })?);
    }

    Err(SearchError::PageLimitExceeded { pages: max_pages })
}
