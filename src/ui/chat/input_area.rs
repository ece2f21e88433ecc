//! Chat input area.

use crate::ui::icons::send_icon;

/// Render the single-line input form for widget `widget_id`.
///
/// The submit button starts disabled when a request is already in flight;
/// the server rejects overlapping submissions either way.
pub fn render_input_area(widget_id: &str, sending: bool) -> String {
    let disabled = if sending { " disabled" } else { "" };
    format!(
        r#"<form id="chat-form" class="chat-form" action="/widget/{widget_id}/submit" method="post" autocomplete="off">
    <input type="text" name="message" class="chat-input" placeholder="Type your message..." aria-label="Chat input"/>
    <button type="submit" class="chat-send" aria-label="Send message"{disabled}>{icon}</button>
</form>"#,
        icon = send_icon(""),
    )
}
