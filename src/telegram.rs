//! Telegram Bot API client and wire types
//!
//! Only the slice of the Bot API this bot speaks: `sendMessage` with inline
//! keyboards, plus webhook registration at startup.

mod client;
mod types;

pub use client::{BotApi, TransportError};
pub use types::{InlineKeyboardButton, InlineKeyboardMarkup, OutgoingMessage};
