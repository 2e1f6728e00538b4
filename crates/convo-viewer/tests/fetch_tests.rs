//! Fetch and viewer integration tests against an in-process HTTP server.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use convo_viewer::app::{ChainsView, Command, Event, TreeView, Viewer};
use convo_viewer::config::FetchConfig;
use convo_viewer::fetch::{ApiClient, FetchError, FetchTarget, Fetched};
use convo_viewer::once::run_once;
use convo_tree::LayoutConfig;

// ─── Test server ─────────────────────────────────────────────────────────────

async fn serve() -> String {
    let app = Router::new()
        .route(
            "/data",
            get(|| async {
                Json(json!({
                    "data": {
                        "allTweets": {
                            "1": { "text": "hello https://example.com", "authorName": "ann", "createdAt": "t1" },
                            "2": { "text": "reply", "authorName": "bob", "createdAt": "t2", "photos": ["p.png"] }
                        },
                        "conversationChains": [["1", "2"], ["1"]],
                        "totalConversationsCount": 2,
                        "lastRunAt": "2024-05-01T12:00:00Z"
                    }
                }))
            }),
        )
        .route("/empty", get(|| async { Json(json!({})) }))
        .route(
            "/trees.json",
            get(|| async {
                Json(json!([
                    { "id": "root", "childrenIds": ["a", "b"], "text": "" },
                    { "id": "a", "childrenIds": ["c"], "text": "first" },
                    { "id": "b", "text": "second" },
                    { "id": "c", "childrenIds": [], "text": "third" }
                ]))
            }),
        )
        .route(
            "/cyclic.json",
            get(|| async {
                Json(json!([
                    { "id": "root", "childrenIds": ["a"] },
                    { "id": "a", "childrenIds": ["b"] },
                    { "id": "b", "childrenIds": ["root"] }
                ]))
            }),
        )
        .route("/broken", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route("/html", get(|| async { "<html>not json</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!([]))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client() -> ApiClient {
    ApiClient::new(&FetchConfig::default()).unwrap()
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_chains() {
    let base = serve().await;
    let resp = client().fetch_chains(&format!("{}/data", base)).await.unwrap();
    let data = resp.data.expect("payload present");
    assert_eq!(data.total(), 2);
    assert_eq!(data.all_tweets.len(), 2);

    let chain = data.resolve_chain(0).unwrap();
    let authors: Vec<&str> = chain.iter().map(|(_, t)| t.author_name.as_str()).collect();
    assert_eq!(authors, vec!["ann", "bob"]);
    assert_eq!(chain[1].1.photo_urls(), &["p.png".to_string()]);
}

#[tokio::test]
async fn test_fetch_chains_without_data() {
    let base = serve().await;
    let resp = client().fetch_chains(&format!("{}/empty", base)).await.unwrap();
    assert!(resp.data.is_none());
}

#[tokio::test]
async fn test_fetch_nodes() {
    let base = serve().await;
    let nodes = client().fetch_nodes(&format!("{}/trees.json", base)).await.unwrap();
    assert_eq!(nodes.len(), 4);
    assert!(nodes[2].children_ids.is_empty(), "missing childrenIds defaults to empty");
}

#[tokio::test]
async fn test_fetch_dispatches_on_target() {
    let base = serve().await;
    let target = FetchTarget::Tree {
        url: format!("{}/trees.json", base),
    };
    assert!(matches!(client().fetch(&target).await, Ok(Fetched::Tree(_))));
}

#[tokio::test]
async fn test_server_error_status() {
    let base = serve().await;
    let err = client().fetch_nodes(&format!("{}/broken", base)).await.unwrap_err();
    match err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body() {
    let base = serve().await;
    let err = client().fetch_nodes(&format!("{}/html", base)).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_unreachable_host() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client().fetch_nodes(&format!("http://{}/trees.json", addr)).await.unwrap_err();
    assert!(matches!(err, FetchError::Request { .. }));
}

#[tokio::test]
async fn test_configured_timeout() {
    let base = serve().await;
    let client = ApiClient::new(&FetchConfig { timeout_secs: Some(1) }).unwrap();
    let err = client.fetch_nodes(&format!("{}/slow", base)).await.unwrap_err();
    assert!(matches!(err, FetchError::Request { .. }));
}

// ─── Viewer flow ─────────────────────────────────────────────────────────────

fn tree_viewer(url: String) -> Viewer {
    Viewer::Tree(TreeView::new(url, "root", LayoutConfig::default(), 10.0, 50.0))
}

#[tokio::test]
async fn test_tree_viewer_loads_and_pages() {
    let base = serve().await;
    let mut viewer = tree_viewer(format!("{}/trees.json", base));

    viewer.begin_fetch();
    assert!(viewer.is_loading());
    let result = client().fetch(&viewer.target()).await;
    viewer.finish_fetch(result);
    assert!(!viewer.is_loading());

    let Viewer::Tree(view) = &mut viewer else { unreachable!() };
    let ids: Vec<&str> = view.current_path().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["root", "a", "c"]);
    assert_eq!(view.position_label().as_deref(), Some("1/2 conversations"));

    assert_eq!(view.update(Event::Next), Command::Redraw);
    let ids: Vec<&str> = view.current_path().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["root", "b"]);
    assert_eq!(view.update(Event::Next), Command::None);
}

#[tokio::test]
async fn test_cyclic_tree_is_reported_not_loaded() {
    let base = serve().await;
    let mut viewer = tree_viewer(format!("{}/cyclic.json", base));
    viewer.begin_fetch();
    let result = client().fetch(&viewer.target()).await;
    viewer.finish_fetch(result);

    let Viewer::Tree(view) = &viewer else { unreachable!() };
    assert!(view.loaded.is_none());
    assert!(view.error.as_deref().unwrap_or_default().contains("cycle"));
}

#[tokio::test]
async fn test_failed_refetch_keeps_chains() {
    let base = serve().await;
    let mut viewer = Viewer::Chains(ChainsView::new(format!("{}/data", base)));
    viewer.begin_fetch();
    let result = client().fetch(&viewer.target()).await;
    viewer.finish_fetch(result);

    let broken = client().fetch_chains(&format!("{}/broken", base)).await.map(Fetched::Chains);
    viewer.begin_fetch();
    viewer.finish_fetch(broken);

    let Viewer::Chains(view) = &viewer else { unreachable!() };
    assert!(view.error.is_some());
    assert!(view.payload.is_some());
    assert_eq!(view.current_chain().len(), 2);
    assert!(view.can_refetch());
}

#[tokio::test]
async fn test_run_once_prints_tree() {
    let base = serve().await;
    let mut out = Vec::new();
    run_once(tree_viewer(format!("{}/trees.json", base)), &client(), &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("4 nodes, 2 conversations"));
    assert!(text.contains("[c] third"));
}

#[tokio::test]
async fn test_run_once_surfaces_fetch_errors() {
    let base = serve().await;
    let mut out = Vec::new();
    let err = run_once(tree_viewer(format!("{}/broken", base)), &client(), &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("500"));
    assert!(out.is_empty());
}
