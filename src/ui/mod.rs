//! UI rendering.
//!
//! Server-rendered HTML for the page shell and the chat widget. The browser
//! side is a small script (`static/widget.js`) that posts the form and swaps
//! in the returned message list.
//!
//! # Structure
//!
//! - [`page`]: Page shell that mounts the widget
//! - [`chat`]: Chat widget frame, message list and input area
//! - [`icons`]: Inline SVG icons

pub mod chat;
pub mod icons;
pub mod page;

/// How bot reply markup is treated when rendered.
///
/// Reply markup comes from the chat endpoint and is inserted into the page
/// unsanitized under [`MarkupPolicy::Trusted`]. Only use that policy when the
/// endpoint is fully trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupPolicy {
    /// Insert reply markup as-is.
    #[default]
    Trusted,
    /// HTML-escape reply markup and show it as text.
    Escape,
}

impl MarkupPolicy {
    #[must_use]
    pub fn from_trusted(trusted: bool) -> Self {
        if trusted { Self::Trusted } else { Self::Escape }
    }
}
