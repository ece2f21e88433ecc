use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::AppState;
use crate::config::AppConfig;
use crate::endpoint::HttpChatEndpoint;
use crate::ui::MarkupPolicy;
use crate::ui::chat::render_message_list;
use crate::ui::page::chat_page;
use crate::widget::{MountedWidget, WidgetStore, keepalive_interval};

/// Upper bound on a submitted form body.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Build the application state for `config`.
pub fn build_state(config: Arc<AppConfig>) -> anyhow::Result<AppState> {
    let url = config.endpoint_url()?;
    Ok(AppState {
        widgets: WidgetStore::new(),
        endpoint: Arc::new(HttpChatEndpoint::new(url)),
        markup_policy: MarkupPolicy::from_trusted(config.endpoint.trusted_markup),
        config,
    })
}

/// Build the router over an existing state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(|| async { "ok" }))
        .route("/widget/{id}/submit", post(submit_handler))
        .route("/widget/{id}/messages", get(messages_handler))
        .route("/widget/{id}/close", post(close_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = build_state(Arc::clone(&config))?;

    info!(
        name: "endpoint.config.loaded",
        endpoint = %config.endpoint.url,
        trusted_markup = config.endpoint.trusted_markup,
        "Chat endpoint configured"
    );
    if state.markup_policy == MarkupPolicy::Trusted {
        info!("Bot replies are inserted as unsanitized markup; the endpoint must be trusted");
    }

    let _sweeper = state.widgets.spawn_sweeper(config.idle_timeout());
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body for a submission.
#[derive(Debug, Deserialize)]
struct SubmitForm {
    #[serde(default)]
    message: String,
}

fn lookup(state: &AppState, id: &str) -> Result<MountedWidget, (StatusCode, String)> {
    state
        .widgets
        .get(id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown widget: {id}")))
}

fn list_fragment(state: &AppState, widget: &MountedWidget) -> Html<String> {
    Html(widget.with(|w| render_message_list(w, state.markup_policy)))
}

/// GET / - Page shell with a freshly mounted widget.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let widget = state.widgets.mount();
    Html(chat_page(
        &state.config.widget.title,
        &widget,
        state.markup_policy,
        keepalive_interval(state.config.idle_timeout()),
    ))
}

/// POST /widget/:id/submit - Run one exchange and return the message list.
async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<SubmitForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    let widget = lookup(&state, &id)?;

    let accepted = widget.submit(state.endpoint.as_ref(), &form.message).await;
    if !accepted {
        debug!(widget = %id, "submission ignored (blank or in flight)");
    }

    Ok(list_fragment(&state, &widget))
}

/// GET /widget/:id/messages - Current message list.
///
/// Reading the widget refreshes its activity, so the page also polls this
/// route as its keepalive.
async fn messages_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let widget = lookup(&state, &id)?;
    Ok(list_fragment(&state, &widget))
}

/// POST /widget/:id/close - Discard the widget's conversation.
async fn close_handler(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    match state.widgets.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
