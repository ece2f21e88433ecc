//! Chat Widget
//!
//! A minimal browser chat widget served by Axum: a text input, a scrollable
//! message list, and a round trip to a remote chat endpoint that returns
//! HTML-rendered bot replies.
//!
//! # Architecture
//!
//! - **Server**: Axum routes for the page shell and the widget fragments
//! - **Widget**: Per-page conversation state with an Idle/Sending guard
//! - **Endpoint**: JSON client for the remote chat endpoint
//! - **UI**: Server-rendered HTML plus a small client script
//!
//! # Modules
//!
//! - [`widget`]: Conversation state and submit loop
//! - [`endpoint`]: Remote chat endpoint trait and HTTP client
//! - [`ui`]: Page shell and widget markup
//! - [`config`]: Layered configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod server;
pub mod ui;
pub mod widget;

use std::sync::Arc;

use crate::config::AppConfig;
use endpoint::ChatEndpoint;
use ui::MarkupPolicy;
use widget::WidgetStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Mounted widgets, one per page view.
    pub widgets: WidgetStore,
    /// Remote chat endpoint.
    pub endpoint: Arc<dyn ChatEndpoint>,
    /// How bot reply markup is rendered.
    pub markup_policy: MarkupPolicy,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
