//! Conversation state and the Idle/Sending guard.

use tracing::warn;

use super::message::Message;
use crate::error::Result;

/// Whether the widget accepts submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting submissions.
    #[default]
    Idle,
    /// A request is in flight; new submissions are rejected.
    Sending,
}

/// A submission that has been accepted and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    /// Trimmed text to send as the request payload.
    pub text: String,
}

/// State owned by one mounted chat widget.
///
/// Messages are append-only and kept in send/receive order. Every state
/// change bumps [`ChatWidget::revision`], which is what the view redraws on.
/// The input field itself lives in the browser and is cleared there.
///
/// # Example
///
/// ```rust
/// use chat_widget::widget::{ChatWidget, Phase};
///
/// let mut widget = ChatWidget::new();
/// let outgoing = widget.begin("  hello ").unwrap();
/// assert_eq!(outgoing.text, "hello");
/// assert_eq!(widget.phase(), Phase::Sending);
///
/// widget.settle(Ok("<p>hi</p>".to_string()));
/// assert_eq!(widget.messages().len(), 2);
/// assert_eq!(widget.phase(), Phase::Idle);
/// ```
#[derive(Debug, Default)]
pub struct ChatWidget {
    messages: Vec<Message>,
    phase: Phase,
    revision: u64,
}

impl ChatWidget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The in-flight flag.
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.phase == Phase::Sending
    }

    /// Counter bumped on every state change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Index of the message the view should be scrolled to (the newest).
    #[must_use]
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.messages.len().checked_sub(1)
    }

    /// Accept a submission.
    ///
    /// Returns `None` without touching any state when the trimmed text is
    /// empty or a request is already in flight. Otherwise appends the user
    /// message and enters [`Phase::Sending`].
    pub fn begin(&mut self, text: &str) -> Option<Outgoing> {
        let text = text.trim();
        if text.is_empty() || self.is_sending() {
            return None;
        }

        self.messages.push(Message::user(text));
        self.phase = Phase::Sending;
        self.revision += 1;

        Some(Outgoing {
            text: text.to_string(),
        })
    }

    /// Record the outcome of the in-flight request and return to idle.
    ///
    /// Success appends the reply markup as a bot message; any failure
    /// appends the fallback. Does nothing if no request is in flight.
    pub fn settle(&mut self, result: Result<String>) -> Option<&Message> {
        if !self.is_sending() {
            warn!(name: "widget.settle.unexpected", "settle called with no request in flight");
            return None;
        }

        let message = match result {
            Ok(markup) => Message::bot(markup),
            Err(err) => {
                warn!(name: "widget.submit.failed", error = %err, "chat request failed");
                Message::fallback()
            }
        };

        self.messages.push(message);
        self.phase = Phase::Idle;
        self.revision += 1;
        self.messages.last()
    }
}
