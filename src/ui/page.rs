//! Page shell.

use std::time::Duration;

use super::chat::{html_escape, render_chat_widget};
use super::MarkupPolicy;
use crate::widget::MountedWidget;

/// Generate the HTML document around `content`.
pub fn html_shell(title: &str, content: &str) -> String {
    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/app.css">
    <script defer src="/static/widget.js"></script>
</head>
<body class="page">
    <main class="page-main">
        <h1 class="page-title">{title}</h1>
        {content}
    </main>
</body>
</html>"#
    )
}

/// The chat page: shell plus a freshly mounted widget.
pub fn chat_page(
    title: &str,
    widget: &MountedWidget,
    policy: MarkupPolicy,
    keepalive: Duration,
) -> String {
    html_shell(title, &render_chat_widget(widget, policy, keepalive))
}
