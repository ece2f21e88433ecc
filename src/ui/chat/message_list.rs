//! Chat message list fragment.
//!
//! This is the part of the widget that is redrawn after every state change.
//! The client swaps it in whole and scrolls to the element marked
//! `data-scroll-anchor`.

use std::fmt::Write;

use crate::ui::MarkupPolicy;
use crate::ui::icons::{bot_icon, loader_icon, user_icon};
use crate::widget::{ChatWidget, Message, Role};

/// Escape HTML special characters for safe embedding in HTML documents.
pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render the full message list for `widget`.
pub fn render_message_list(widget: &ChatWidget, policy: MarkupPolicy) -> String {
    let anchor = widget.scroll_anchor();
    let mut html = format!(
        r#"<div id="chat-messages" class="chat-messages" data-revision="{}" data-sending="{}" aria-live="polite" aria-label="Chat messages">"#,
        widget.revision(),
        widget.is_sending(),
    );

    for (index, message) in widget.messages().iter().enumerate() {
        html.push_str(&render_message(index, message, anchor == Some(index), policy));
    }

    if widget.is_sending() {
        let _ = write!(
            html,
            r#"<div class="chat-pending" role="status">{}<span class="sr-only">Waiting for reply</span></div>"#,
            loader_icon("animate-spin"),
        );
    }

    html.push_str("</div>");
    html
}

fn render_message(index: usize, message: &Message, is_anchor: bool, policy: MarkupPolicy) -> String {
    let anchor_attr = if is_anchor { r#" data-scroll-anchor="true""# } else { "" };

    match message.role {
        Role::User => format!(
            r#"<div class="chat-row chat-row-user" data-index="{index}"{anchor_attr}><div class="chat-avatar chat-avatar-user">{}</div><div class="chat-bubble chat-bubble-user">{}</div></div>"#,
            user_icon("text-white"),
            html_escape(&message.content),
        ),
        Role::Bot => format!(
            r#"<div class="chat-row chat-row-bot" data-index="{index}"{anchor_attr}><div class="chat-avatar chat-avatar-bot">{}</div><div class="chat-bubble chat-bubble-bot prose">{}</div></div>"#,
            bot_icon("text-white"),
            render_bot_content(message, policy),
        ),
    }
}

/// Bot content crosses the trust boundary here.
///
/// With [`MarkupPolicy::Trusted`] the endpoint's markup is inserted as-is.
/// The built-in fallback is always rendered as markup.
fn render_bot_content(message: &Message, policy: MarkupPolicy) -> String {
    if message.is_fallback() {
        return message.content.clone();
    }
    match policy {
        MarkupPolicy::Trusted => message.content.clone(),
        MarkupPolicy::Escape => html_escape(&message.content),
    }
}
