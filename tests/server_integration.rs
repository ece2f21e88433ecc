use std::sync::Arc;
use std::time::Duration;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chat_widget::AppState;
use chat_widget::config::AppConfig;
use chat_widget::endpoint::ChatEndpoint;
use chat_widget::error::{ChatError, Result};
use chat_widget::server::build_router;
use chat_widget::ui::MarkupPolicy;
use chat_widget::widget::{FALLBACK_ERROR_MARKUP, WidgetStore};
use tokio::sync::Notify;

/// Canned endpoint: replies with `reply`, or fails when it is `None`.
/// When `gated`, each call waits for `release` before answering.
struct StubEndpoint {
    reply: Option<&'static str>,
    gated: bool,
    calls: AtomicUsize,
    release: Notify,
}

impl StubEndpoint {
    fn new(reply: Option<&'static str>, gated: bool) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gated,
            calls: AtomicUsize::new(0),
            release: Notify::new(),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatEndpoint for StubEndpoint {
    async fn send(&self, _message: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.gated {
            self.release.notified().await;
        }
        self.reply
            .map(str::to_string)
            .ok_or(ChatError::Status { status: 500 })
    }
}

fn test_server(endpoint: Arc<StubEndpoint>, policy: MarkupPolicy) -> (TestServer, WidgetStore) {
    let config = AppConfig::load_from_args(["chat-widget"]).expect("default config");
    let widgets = WidgetStore::new();
    let state = AppState {
        widgets: widgets.clone(),
        endpoint,
        markup_policy: policy,
        config: Arc::new(config),
    };
    (TestServer::new(build_router(state)).unwrap(), widgets)
}

fn widget_id(page: &str) -> String {
    let marker = r#"data-widget-id=""#;
    let start = page.find(marker).expect("page mounts a widget") + marker.len();
    let end = start + page[start..].find('"').unwrap();
    page[start..end].to_string()
}

async fn mount(server: &TestServer) -> String {
    let page = server.get("/").await;
    page.assert_status_ok();
    widget_id(&page.text())
}

#[tokio::test]
async fn test_index_mounts_fresh_widget_per_load() {
    let (server, widgets) = test_server(StubEndpoint::new(Some("<p>hi</p>"), false), MarkupPolicy::Trusted);

    let page = server.get("/").await.text();
    assert!(page.contains("<h1 class=\"page-title\">AI Chatbot</h1>"));
    assert!(page.contains(r#"id="chat-form""#));

    let first = widget_id(&page);
    let second = mount(&server).await;
    assert_ne!(first, second);
    assert_eq!(widgets.len(), 2);
}

#[tokio::test]
async fn test_submit_success_renders_reply() {
    let endpoint = StubEndpoint::new(Some("<p>hi</p>"), false);
    let (server, widgets) = test_server(Arc::clone(&endpoint), MarkupPolicy::Trusted);
    let id = mount(&server).await;

    let response = server
        .post(&format!("/widget/{id}/submit"))
        .form(&[("message", "  hello <you>  ")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("hello &lt;you&gt;"));
    assert!(html.contains("<p>hi</p>"));
    assert!(html.contains(r#"data-sending="false""#));
    assert_eq!(endpoint.calls(), 1);

    let widget = widgets.get(&id).unwrap();
    widget.with(|w| {
        assert_eq!(w.messages().len(), 2);
        assert_eq!(w.messages()[0].content, "hello <you>");
    });
}

#[tokio::test]
async fn test_submit_failure_renders_fallback() {
    let endpoint = StubEndpoint::new(None, false);
    let (server, _widgets) = test_server(Arc::clone(&endpoint), MarkupPolicy::Trusted);
    let id = mount(&server).await;

    let html = server
        .post(&format!("/widget/{id}/submit"))
        .form(&[("message", "hello")])
        .await
        .text();

    assert!(html.contains(FALLBACK_ERROR_MARKUP));
    assert_eq!(html.matches("chat-row-bot").count(), 1);
    assert!(html.contains(r#"data-sending="false""#));
}

#[tokio::test]
async fn test_blank_submit_is_noop() {
    let endpoint = StubEndpoint::new(Some("unused"), false);
    let (server, widgets) = test_server(Arc::clone(&endpoint), MarkupPolicy::Trusted);
    let id = mount(&server).await;

    let html = server
        .post(&format!("/widget/{id}/submit"))
        .form(&[("message", " \t ")])
        .await
        .text();

    assert!(!html.contains("data-index="));
    assert_eq!(endpoint.calls(), 0);
    assert!(widgets.get(&id).unwrap().with(|w| w.messages().is_empty()));
}

#[tokio::test]
async fn test_submit_while_in_flight_is_noop() {
    let endpoint = StubEndpoint::new(Some("<p>first reply</p>"), true);
    let (server, _widgets) = test_server(Arc::clone(&endpoint), MarkupPolicy::Trusted);
    let id = mount(&server).await;
    let url = format!("/widget/{id}/submit");

    let first = async { server.post(&url).form(&[("message", "first")]).await };
    let second = async {
        while endpoint.calls() == 0 {
            tokio::task::yield_now().await;
        }
        let response = server.post(&url).form(&[("message", "second")]).await;
        endpoint.release.notify_one();
        response
    };
    let (first, second) = tokio::join!(first, second);

    let second = second.text();
    assert_eq!(second.matches("data-index=").count(), 1);
    assert!(second.contains(r#"data-sending="true""#));
    assert!(!second.contains("second"));

    let first = first.text();
    assert_eq!(first.matches("chat-row-user").count(), 1);
    assert!(first.contains("<p>first reply</p>"));
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test]
async fn test_escape_policy_applies_to_replies() {
    let (server, _widgets) = test_server(StubEndpoint::new(Some("<p>hi</p>"), false), MarkupPolicy::Escape);
    let id = mount(&server).await;

    let html = server
        .post(&format!("/widget/{id}/submit"))
        .form(&[("message", "hello")])
        .await
        .text();

    assert!(html.contains("&lt;p&gt;hi&lt;/p&gt;"));
}

#[tokio::test]
async fn test_messages_fragment_and_close() {
    let (server, widgets) = test_server(StubEndpoint::new(Some("ok"), false), MarkupPolicy::Trusted);
    let id = mount(&server).await;

    server
        .post(&format!("/widget/{id}/submit"))
        .form(&[("message", "hello")])
        .await
        .assert_status_ok();

    let list = server.get(&format!("/widget/{id}/messages")).await.text();
    assert_eq!(list.matches("data-index=").count(), 2);
    assert_eq!(list.matches("data-scroll-anchor").count(), 1);

    server
        .post(&format!("/widget/{id}/close"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(widgets.is_empty());

    server
        .get(&format!("/widget/{id}/messages"))
        .expect_failure()
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_polled_widget_survives_idle_sweep() {
    let (server, widgets) = test_server(StubEndpoint::new(Some("ok"), false), MarkupPolicy::Trusted);

    let page = server.get("/").await.text();
    assert!(page.contains(r#"data-keepalive-ms="450000""#));
    assert!(page.contains(r#"<template id="chat-fallback">"#));
    let open = widget_id(&page);
    let abandoned = mount(&server).await;

    tokio::time::sleep(Duration::from_millis(30)).await;
    server
        .get(&format!("/widget/{open}/messages"))
        .await
        .assert_status_ok();

    assert_eq!(widgets.cleanup_expired_with_timeout(Duration::from_millis(20)), 1);
    assert!(widgets.get(&open).is_some());
    assert!(widgets.get(&abandoned).is_none());
}

#[tokio::test]
async fn test_unknown_widget_is_not_found() {
    let endpoint = StubEndpoint::new(Some("unused"), false);
    let (server, _widgets) = test_server(Arc::clone(&endpoint), MarkupPolicy::Trusted);

    server
        .post("/widget/nope/submit")
        .form(&[("message", "hello")])
        .expect_failure()
        .await
        .assert_status_not_found();
    assert_eq!(endpoint.calls(), 0);
}

#[tokio::test]
async fn test_health() {
    let (server, _widgets) = test_server(StubEndpoint::new(None, false), MarkupPolicy::Trusted);
    server.get("/health").await.assert_text("ok");
}
