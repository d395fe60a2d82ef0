//! Static pages, probes, and router edge cases through the full route table.

mod common;

use std::sync::Arc;

use newsdesk::app::AppState;
use newsdesk::config::SeedItem;
use newsdesk::news::MemoryNewsStore;
use newsdesk::{Error, Method, Request};

use common::*;

#[tokio::test]
async fn root_renders_home_page() {
    let res = get(&app(), "/").await;
    assert_eq!(res.status_code(), 200);
    let html = body(&res);
    assert!(html.contains("<title>Home | newsdesk</title>"));
    assert!(html.contains("Welcome to newsdesk"));
}

#[tokio::test]
async fn named_page_gets_capitalized_title() {
    let res = get(&app(), "/about").await;
    assert_eq!(res.status_code(), 200);
    assert!(body(&res).contains("<h1>About</h1>"));
}

#[tokio::test]
async fn pages_index_links_every_page() {
    let html = body(&get(&app(), "/pages").await);
    assert!(html.contains(r#"href="/home""#));
    assert!(html.contains(r#"href="/about""#));
}

#[tokio::test]
async fn unknown_page_is_404() {
    let res = get(&app(), "/contact").await;
    assert_eq!(res.status_code(), 404);
    assert!(body(&res).contains("Cannot find the page: contact"));
}

#[tokio::test]
async fn template_names_are_not_pages() {
    for path in ["/index", "/header"] {
        assert_eq!(get(&app(), path).await.status_code(), 404, "{path}");
    }
}

#[tokio::test]
async fn unrouted_path_uses_html_fallback() {
    let res = get(&app(), "/deeply/nested/path").await;
    assert_eq!(res.status_code(), 404);
    assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
    let html = body(&res);
    assert!(html.contains("Cannot find the page: deeply"));
    assert!(!html.contains("page: &#x2f;"));
}

#[tokio::test]
async fn fallback_and_page_messages_agree() {
    let html = body(&get(&app(), "/caf%C3%A9/menu").await);
    assert!(html.contains("Cannot find the page: café"));
}

#[tokio::test]
async fn wrong_method_is_405() {
    let res = app().dispatch(Request::new(Method::Delete, "/news")).await;
    assert_eq!(res.status_code(), 405);
    assert_eq!(res.header("allow"), Some("GET, HEAD, POST"));
}

#[tokio::test]
async fn head_answers_wherever_get_does() {
    let app = app();
    for path in ["/", "/news", "/news/new", "/healthz"] {
        let res = app.dispatch(Request::new(Method::Head, path)).await;
        assert_eq!(res.status_code(), 200, "{path}");
        assert!(res.body().is_empty(), "{path}");
    }
    let res = app.dispatch(Request::new(Method::Head, "/news/missing")).await;
    assert_eq!(res.status_code(), 404);
    assert!(res.body().is_empty());
}

#[tokio::test]
async fn probes_answer() {
    let app = app();
    let live = get(&app, "/healthz").await;
    assert_eq!((live.status_code(), body(&live).as_str()), (200, "ok"));
    let ready = get(&app, "/readyz").await;
    assert_eq!((ready.status_code(), body(&ready).as_str()), (200, "ready"));
}

#[tokio::test]
async fn seed_items_go_through_validation() {
    let state = AppState::new(Arc::new(MemoryNewsStore::new()));
    let seeded = state
        .seed(vec![
            SeedItem { title: "Launch Day".into(), body: "We are live today.".into() },
            SeedItem { title: "Second Post".into(), body: "More news to share.".into() },
        ])
        .await
        .unwrap();
    assert_eq!(seeded, 2);

    let app = app_with(state);
    assert_eq!(get(&app, "/news/launch-day").await.status_code(), 200);
    assert_eq!(get(&app, "/news/second-post").await.status_code(), 200);
}

#[tokio::test]
async fn invalid_seed_item_is_an_error() {
    let state = AppState::new(Arc::new(MemoryNewsStore::new()));
    let err = state
        .seed(vec![SeedItem { title: "Hi".into(), body: "too short".into() }])
        .await
        .unwrap_err();
    match err {
        Error::InvalidSeed { title, errors } => {
            assert_eq!(title, "Hi");
            assert!(errors.get("title").is_some());
            assert!(errors.get("body").is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}
