//! Outbound notifications for catalog events.
//!
//! - [`MovieNotifier`] -- the channel-agnostic publish hook called when a
//!   movie is published.
//! - [`delivery::telegram`] -- Telegram Bot API delivery.
//! - [`NoopNotifier`] -- used when no channel is configured.

pub mod delivery;
pub mod notifier;

pub use delivery::telegram::{TelegramConfig, TelegramNotifier};
pub use notifier::{MovieAnnouncement, MovieNotifier, NoopNotifier, NotifyError};
