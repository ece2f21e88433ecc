//! HTTP implementation of [`ChatEndpoint`] over reqwest.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{ChatEndpoint, ChatReply, ChatRequest};
use crate::error::{ChatError, Result};

/// Posts messages to a fixed URL as JSON.
///
/// No timeout, retry or cancellation is layered on top of reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpChatEndpoint {
    url: Url,
    http: reqwest::Client,
}

impl HttpChatEndpoint {
    /// Create a client for the endpoint at `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
        }
    }

    fn decode(body: &[u8]) -> Result<String> {
        let reply: ChatReply = serde_json::from_slice(body)?;
        Ok(reply.response)
    }
}

#[async_trait]
impl ChatEndpoint for HttpChatEndpoint {
    async fn send(&self, message: &str) -> Result<String> {
        let req = ChatRequest {
            message: message.to_string(),
        };
        let response = self.http.post(self.url.clone()).json(&req).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "chat endpoint replied");
        Self::decode(&body)
    }
}
