//! Chat widget markup.
//!
//! Plain string renderers; the message list is the only fragment that is
//! re-rendered after the page has loaded.

mod input_area;
mod message_list;
mod shell;

pub use input_area::render_input_area;
pub use message_list::{html_escape, render_message_list};
pub use shell::render_chat_widget;
