//! Inline SVG icons.

/// Common icon size class.
const ICON_SIZE: &str = "h-4 w-4";

fn svg(class: &str, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="{ICON_SIZE} {class}" aria-hidden="true">{body}</svg>"#
    )
}

/// Send/arrow icon.
pub fn send_icon(class: &str) -> String {
    svg(
        class,
        r#"<line x1="22" y1="2" x2="11" y2="13"/><polygon points="22 2 15 22 11 13 2 9 22 2"/>"#,
    )
}

/// User avatar icon.
pub fn user_icon(class: &str) -> String {
    svg(
        class,
        r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#,
    )
}

/// Bot avatar icon.
pub fn bot_icon(class: &str) -> String {
    svg(
        class,
        r#"<rect x="3" y="11" width="18" height="10" rx="2"/><circle cx="12" cy="5" r="2"/><path d="M12 7v4"/>"#,
    )
}

/// Spinner shown while a request is in flight.
pub fn loader_icon(class: &str) -> String {
    svg(class, r#"<path d="M21 12a9 9 0 1 1-6.219-8.56"/>"#)
}
