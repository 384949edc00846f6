//! Update dispatch and effect execution

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::Dispatcher;
pub use traits::{ReservationStore, Transport};

use crate::db::Database;
use crate::session::InMemorySessions;
use crate::telegram::BotApi;

/// Type alias for the production dispatcher with concrete implementations
pub type ProductionDispatcher = Dispatcher<InMemorySessions, Database, BotApi>;
