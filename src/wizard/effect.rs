//! Effects produced by wizard transitions

use crate::db::NewReservation;
use std::time::Duration;

/// Delay between the confirmation messages so the transport does not see a
/// rapid-fire burst.
pub const MESSAGE_PAUSE: Duration = Duration::from_secs(2);

/// Keyboards the runtime knows how to render.
///
/// Rendering is deferred because the date picker depends on the current
/// day; keeping specs here keeps transitions pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardSpec {
    MainMenu,
    DatePicker,
    TimeGrid,
    PartySize,
}

/// Effects to be executed, in order, after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a message to the requester's chat.
    Reply {
        text: String,
        keyboard: Option<KeyboardSpec>,
    },

    /// Fixed-duration delay between outbound messages.
    Pause { duration: Duration },

    /// Append the completed reservation.
    SaveReservation { reservation: NewReservation },

    /// Send a message to the administrator channel.
    NotifyAdmin { text: String },
}

impl Effect {
    pub fn reply(text: impl Into<String>) -> Self {
        Effect::Reply {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn reply_with(text: impl Into<String>, keyboard: KeyboardSpec) -> Self {
        Effect::Reply {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn pause() -> Self {
        Effect::Pause {
            duration: MESSAGE_PAUSE,
        }
    }
}
