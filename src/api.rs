//! Webhook HTTP surface

mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{CallbackQuery, Chat, IncomingMessage, Update, User};

use crate::config::Config;
use crate::db::Database;
use crate::runtime::{Dispatcher, ProductionDispatcher};
use crate::session::InMemorySessions;
use crate::telegram::BotApi;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ProductionDispatcher>,
    /// Expected webhook path segment; doubles as the shared secret.
    pub bot_token: String,
}

impl AppState {
    pub fn new(config: &Config, db: Database, bot: BotApi) -> Self {
        let dispatcher = Dispatcher::new(
            InMemorySessions::new(),
            db,
            bot,
            config.admin_chat_id,
        );
        Self {
            dispatcher: Arc::new(dispatcher),
            bot_token: config.bot_token.clone(),
        }
    }
}
