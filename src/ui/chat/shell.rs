//! Chat widget frame.

use std::time::Duration;

use super::{render_input_area, render_message_list};
use crate::ui::MarkupPolicy;
use crate::widget::{FALLBACK_ERROR_MARKUP, MountedWidget};

/// Render the complete widget: scrollable message area plus input form.
///
/// The mount id is carried on the root element so the client script knows
/// which widget to talk to, and `keepalive` tells it how often to ping the
/// server while the page stays open. The fallback markup is shipped in a
/// `<template>` so the client can show it when the submit request itself
/// fails.
pub fn render_chat_widget(
    widget: &MountedWidget,
    policy: MarkupPolicy,
    keepalive: Duration,
) -> String {
    let (list, sending) = widget.with(|w| (render_message_list(w, policy), w.is_sending()));
    format!(
        r#"<section class="chat-widget" data-widget-id="{id}" data-keepalive-ms="{keepalive_ms}">
    <div id="chat-scroll" class="chat-scroll">{list}</div>
    {input}
    <template id="chat-fallback">{FALLBACK_ERROR_MARKUP}</template>
</section>"#,
        id = widget.id(),
        keepalive_ms = keepalive.as_millis(),
        input = render_input_area(widget.id(), sending),
    )
}
