//! Remote chat endpoint client.
//!
//! The widget talks to exactly one collaborator: a service that accepts a
//! text message and returns a markup reply. [`ChatEndpoint`] is the seam;
//! [`HttpChatEndpoint`] is the production implementation.
//!
//! # Wire contract
//!
//! ```text
//! POST <endpoint>            Content-Type: application/json
//! { "message": "<text>" }
//!
//! 2xx
//! { "response": "<markup>" }
//! ```

mod http;

pub use http::HttpChatEndpoint;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// Successful response body from the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    /// Pre-rendered markup for the bot message.
    pub response: String,
}

/// Anything that can exchange one line of user text for a markup reply.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send `message` and return the reply markup.
    async fn send(&self, message: &str) -> Result<String>;
}
