//! Service-level tests over a scripted transport: pagination, memoization,
//! single-flight, and failure propagation.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use gh_issues::{
    GitHubService, SearchConfig, SearchConnection, SearchError, SearchResult, SearchTransport,
};

/// Transport that replays a fixed script of pages and records every request.
struct ScriptedTransport {
    pages: Mutex<VecDeque<SearchConnection>>,
    calls: AtomicUsize,
    variables: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    fn new(pages: Vec<Value>) -> Arc<Self> {
        let pages = pages
            .into_iter()
            .map(|p| serde_json::from_value(p).expect("valid page fixture"))
            .collect();
        Arc::new(Self {
            pages: Mutex::new(pages),
            calls: AtomicUsize::new(0),
            variables: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchTransport for ScriptedTransport {
    async fn search(&self, _document: &str, variables: Value) -> SearchResult<SearchConnection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.variables.lock().await.push(variables);
        self.pages
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| SearchError::MalformedResponse("transport script exhausted".into()))
    }
}

fn service(transport: Arc<ScriptedTransport>) -> GitHubService {
    GitHubService::with_transport(transport, SearchConfig::default())
}

fn since() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
}

fn orgs() -> Vec<String> {
    vec!["octo-org".to_string()]
}

fn issue_node(id: &str) -> Value {
    json!({
        "id": id,
        "number": 1,
        "title": format!("issue {id}"),
        "url": format!("https://github.com/octo-org/repo/issues/{id}"),
        "createdAt": "2023-01-15T00:00:00Z",
        "updatedAt": "2023-01-15T00:00:00Z",
        "author": {
            "id": "U_1",
            "login": "octocat",
            "avatarUrl": "https://avatars.githubusercontent.com/u/1",
            "url": "https://github.com/octocat"
        },
        "comments": { "totalCount": 0 },
        "labels": { "nodes": [] },
        "repository": {
            "id": "R_1",
            "name": "repo",
            "nameWithOwner": "octo-org/repo",
            "url": "https://github.com/octo-org/repo"
        }
    })
}

fn page(nodes: Vec<Value>, end_cursor: Option<&str>) -> Value {
    json!({
        "nodes": nodes,
        "pageInfo": {
            "hasNextPage": end_cursor.is_some(),
            "endCursor": end_cursor
        }
    })
}

#[tokio::test]
async fn pagination_concatenates_pages_until_last() {
    let transport = ScriptedTransport::new(vec![
        page(vec![issue_node("I_1"), issue_node("I_2")], Some("cursor-1")),
        page(vec![issue_node("I_3")], Some("cursor-2")),
        page(vec![issue_node("I_4")], None),
    ]);
    let service = service(Arc::clone(&transport));

    let issues = service
        .get_issues(&orgs(), &[], &[], since())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 3);
    let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["I_1", "I_2", "I_3", "I_4"]);
}

#[tokio::test]
async fn cursor_is_absent_first_then_bound_to_end_cursor() {
    let transport = ScriptedTransport::new(vec![
        page(vec![issue_node("I_1")], Some("cursor-1")),
        page(vec![issue_node("I_2")], None),
    ]);
    let service = service(Arc::clone(&transport));

    service
        .get_issues(&orgs(), &[], &[], since())
        .await
        .unwrap();

    let variables = transport.variables.lock().await;
    assert!(variables[0]["after"].is_null());
    assert_eq!(variables[1]["after"], "cursor-1");
    assert_eq!(variables[0]["first"], 100);
    let search = variables[0]["searchQuery"].as_str().unwrap();
    assert!(search.starts_with("org:octo-org is:open is:issue"));
}

#[tokio::test]
async fn identical_sequential_calls_fetch_once_and_share_the_result() {
    let transport = ScriptedTransport::new(vec![page(vec![issue_node("I_1")], None)]);
    let service = service(Arc::clone(&transport));

    let first = service
        .get_issues(&orgs(), &[], &[], since())
        .await
        .unwrap();
    let second = service
        .get_issues(&orgs(), &[], &[], since())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn reordered_filters_hit_the_same_cache_entry() {
    let transport = ScriptedTransport::new(vec![page(vec![issue_node("I_1")], None)]);
    let service = service(Arc::clone(&transport));

    let forward = vec!["alpha".to_string(), "beta".to_string()];
    let reversed = vec!["beta".to_string(), "alpha".to_string()];
    service
        .get_issues(&forward, &[], &[], since())
        .await
        .unwrap();
    service
        .get_issues(&reversed, &[], &[], since())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn concurrent_identical_calls_are_coalesced() {
    let transport = ScriptedTransport::new(vec![page(vec![issue_node("I_1")], None)]);
    let service = service(Arc::clone(&transport));

    let orgs = orgs();
    let (a, b) = tokio::join!(
        service.get_issues(&orgs, &[], &[], since()),
        service.get_issues(&orgs, &[], &[], since()),
    );

    assert_eq!(transport.calls(), 1);
    assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
}

#[tokio::test]
async fn get_repos_end_to_end_drops_nodes_without_id() {
    let valid = json!({
        "id": "R_1",
        "name": "repo",
        "nameWithOwner": "octo-org/repo",
        "description": "A repo",
        "stargazerCount": 42,
        "forkCount": 3,
        "url": "https://github.com/octo-org/repo",
        "pushedAt": "2023-01-15T00:00:00Z"
    });
    let missing_id = json!({
        "name": "ghost-repo",
        "nameWithOwner": "octo-org/ghost-repo"
    });
    let transport = ScriptedTransport::new(vec![page(vec![valid, missing_id], None)]);
    let service = service(Arc::clone(&transport));

    let repos = service.get_repos(&orgs(), &[], since()).await.unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].id, "R_1");
    assert_eq!(repos[0].pushed_at, 1_673_740_800_000);

    let variables = transport.variables.lock().await;
    assert_eq!(variables[0]["first"], 5);
    let search = variables[0]["searchQuery"].as_str().unwrap();
    assert!(search.contains("good-first-issues:>0"));
    assert!(search.contains("pushed:>2023-01-01"));
}

#[tokio::test]
async fn issue_and_repo_caches_are_distinct() {
    let transport = ScriptedTransport::new(vec![
        page(vec![issue_node("I_1")], None),
        page(vec![json!({ "id": "R_1" })], None),
    ]);
    let service = service(Arc::clone(&transport));

    service
        .get_issues(&orgs(), &[], &[], since())
        .await
        .unwrap();
    service.get_repos(&orgs(), &[], since()).await.unwrap();

    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn page_limit_is_a_fatal_error() {
    let transport = ScriptedTransport::new(vec![
        page(vec![issue_node("I_1")], Some("cursor-1")),
        page(vec![issue_node("I_2")], Some("cursor-2")),
    ]);
    let config = SearchConfig {
        max_pages: 2,
        ..SearchConfig::default()
    };
    let service =
        GitHubService::with_transport(Arc::clone(&transport) as Arc<dyn SearchTransport>, config);

    let result = service.get_issues(&orgs(), &[], &[], since()).await;

    assert_eq!(transport.calls(), 2);
    assert!(matches!(
        result,
        Err(SearchError::PageLimitExceeded { pages: 2 })
    ));
}

#[tokio::test]
async fn next_page_without_cursor_is_malformed() {
    let malformed = json!({
        "nodes": [issue_node("I_1")],
        "pageInfo": { "hasNextPage": true, "endCursor": null }
    });
    let transport = ScriptedTransport::new(vec![malformed]);
    let service = service(Arc::clone(&transport));

    let result = service.get_issues(&orgs(), &[], &[], since()).await;
    assert!(matches!(result, Err(SearchError::MalformedResponse(_))));
}

#[tokio::test]
async fn failures_discard_partial_pages_and_are_not_cached() {
    // One good page pointing at a next page the transport cannot serve.
    let transport = ScriptedTransport::new(vec![page(vec![issue_node("I_1")], Some("cursor-1"))]);
    let service = service(Arc::clone(&transport));

    let first = service.get_issues(&orgs(), &[], &[], since()).await;
    assert!(first.is_err());
    assert_eq!(transport.calls(), 2);

    // The failed fetch left the cache slot empty, so the next call retries.
    let second = service.get_issues(&orgs(), &[], &[], since()).await;
    assert!(second.is_err());
    assert_eq!(transport.calls(), 3);
}
