//! External delivery channels for catalog announcements.

pub mod telegram;
