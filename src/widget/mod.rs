//! The chat widget: conversation state, submit loop and mount registry.
//!
//! # Structure
//!
//! - [`Message`]: one conversation turn
//! - [`ChatWidget`]: per-page conversation state with the Idle/Sending guard
//! - [`WidgetStore`]: lookup of mounted widgets by mount id

mod message;
mod state;
mod store;

pub use message::{FALLBACK_ERROR_MARKUP, Message, Role};
pub use state::{ChatWidget, Outgoing, Phase};
pub use store::{MountedWidget, WidgetStore, keepalive_interval};
