//! Conversation messages.

use serde::{Deserialize, Serialize};

/// Markup shown in place of a reply when the endpoint round trip fails.
pub const FALLBACK_ERROR_MARKUP: &str =
    "<h2>Error</h2><p>Sorry, I encountered an error. Please try again.</p>";

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person using the widget.
    User,
    /// Returned by the chat endpoint (or the fallback).
    Bot,
}

/// One turn of the conversation.
///
/// User content is plain text. Bot content is markup produced by the chat
/// endpoint, or the built-in fallback when no reply could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Set only by [`Message::fallback`]; reply content never sets it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    fallback: bool,
}

impl Message {
    /// A user message with literal text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            fallback: false,
        }
    }

    /// A bot message with reply markup.
    pub fn bot(markup: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            content: markup.into(),
            fallback: false,
        }
    }

    /// The bot message used when no reply could be obtained.
    pub fn fallback() -> Self {
        Self {
            fallback: true,
            ..Self::bot(FALLBACK_ERROR_MARKUP)
        }
    }

    /// Whether this is the built-in fallback rather than endpoint content.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}
