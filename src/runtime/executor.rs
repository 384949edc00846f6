//! Update dispatcher
//!
//! Routes raw transport updates into wizard events, serializes processing
//! per user id, and executes the effects each transition returns.

use super::traits::{ReservationStore, Transport};
use crate::api::{Update, User};
use crate::session::SessionStore;
use crate::telegram::OutgoingMessage;
use crate::wizard::{
    keyboards, messages, transition, Effect, Event, KeyboardSpec, Requester, SessionChange,
    TransitionResult,
};
use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Generic dispatcher that can work with any session store, reservation
/// store, and transport implementation.
pub struct Dispatcher<S, R, T>
where
    S: SessionStore,
    R: ReservationStore,
    T: Transport,
{
    sessions: S,
    store: R,
    transport: T,
    admin_chat_id: i64,
    /// Per-user locks; updates for one user are processed to completion
    /// before the next is accepted (duplicate webhook deliveries would
    /// otherwise race on the same draft).
    user_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

/// Where an update goes after routing.
#[derive(Debug)]
enum Routed {
    /// `/panel`: post the start-reservation deep link into the chat.
    Panel { thread_id: Option<i64> },
    /// Everything the wizard handles.
    Wizard(Event),
}

impl<S, R, T> Dispatcher<S, R, T>
where
    S: SessionStore,
    R: ReservationStore,
    T: Transport,
{
    pub fn new(sessions: S, store: R, transport: T, admin_chat_id: i64) -> Self {
        Self {
            sessions,
            store,
            transport,
            admin_chat_id,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Process one webhook update to completion. Failures are logged, not
    /// surfaced: the webhook always acknowledges so the transport does not
    /// redeliver.
    pub async fn process_update(&self, update: Update) {
        let Some((requester, routed)) = route_update(update) else {
            tracing::debug!("ignoring update without actionable content");
            return;
        };

        let user_id = requester.user_id;
        if let Err(error) = self.process(requester, routed).await {
            tracing::error!(user_id, %error, "update processing failed");
        }
    }

    async fn process(&self, requester: Requester, routed: Routed) -> Result<(), String> {
        let lock = self.user_lock(requester.user_id).await;
        let _guard = lock.lock().await;

        match routed {
            Routed::Panel { thread_id } => {
                self.transport
                    .send(
                        &OutgoingMessage::text(requester.chat_id, messages::PANEL)
                            .with_keyboard(keyboards::panel())
                            .in_thread(thread_id),
                    )
                    .await
            }
            Routed::Wizard(event) => {
                let session = self.sessions.get(requester.user_id);
                let result = transition(session.as_ref(), &requester, event);
                self.apply(&requester, result).await
            }
        }
    }

    async fn apply(&self, requester: &Requester, result: TransitionResult) -> Result<(), String> {
        let TransitionResult { session, effects } = result;

        // The insert runs before the session change: a failed write keeps
        // the draft in place so re-sending the notes retries it.
        for effect in &effects {
            if let Effect::SaveReservation { reservation } = effect {
                match self.store.insert_reservation(reservation).await {
                    Ok(reservation_id) => {
                        tracing::info!(
                            user_id = requester.user_id,
                            reservation_id,
                            "reservation stored"
                        );
                    }
                    Err(error) => {
                        tracing::error!(
                            user_id = requester.user_id,
                            %error,
                            "reservation insert failed"
                        );
                        self.reply(requester, messages::SAVE_RETRY, None).await?;
                        return Err(error);
                    }
                }
            }
        }

        match session {
            SessionChange::Keep => {}
            SessionChange::Put(next) => self.sessions.put(requester.user_id, next),
            SessionChange::Clear => self.sessions.delete(requester.user_id),
        }

        for effect in effects {
            match effect {
                // Already executed above.
                Effect::SaveReservation { .. } => {}
                Effect::Reply { text, keyboard } => self.reply(requester, &text, keyboard).await?,
                Effect::Pause { duration } => tokio::time::sleep(duration).await,
                Effect::NotifyAdmin { text } => {
                    self.transport
                        .send(&OutgoingMessage::text(self.admin_chat_id, text))
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn reply(
        &self,
        requester: &Requester,
        text: &str,
        keyboard: Option<KeyboardSpec>,
    ) -> Result<(), String> {
        let mut message = OutgoingMessage::text(requester.chat_id, text);
        if let Some(spec) = keyboard {
            message = message.with_keyboard(keyboards::render(spec, Local::now().date_naive()));
        }
        self.transport.send(&message).await
    }

    async fn user_lock(&self, user_id: i64) -> Arc<Mutex<()>> {
        self.user_locks
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }
}

fn route_update(update: Update) -> Option<(Requester, Routed)> {
    if let Some(query) = update.callback_query {
        let token = query.data?;
        // Replies go to the chat the button lives in; fall back to a direct
        // chat with the presser if the origin message is gone.
        let chat_id = query.message.as_ref().map_or(query.from.id, |m| m.chat.id);
        let requester = requester_from(&query.from, chat_id);
        return Some((requester, Routed::Wizard(Event::selection(token))));
    }

    if let Some(message) = update.message {
        let text = message.text?;
        let from = message.from?;
        let requester = requester_from(&from, message.chat.id);

        let routed = if is_command(&text, "start") {
            Routed::Wizard(Event::Start)
        } else if is_command(&text, "panel") {
            Routed::Panel {
                thread_id: message.message_thread_id,
            }
        } else {
            Routed::Wizard(Event::text(text))
        };
        return Some((requester, routed));
    }

    None
}

fn requester_from(user: &User, chat_id: i64) -> Requester {
    Requester {
        user_id: user.id,
        chat_id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
    }
}

/// Matches `/cmd`, `/cmd@botname`, and `/cmd args`.
fn is_command(text: &str, command: &str) -> bool {
    let Some(rest) = text.trim_start().strip_prefix('/') else {
        return false;
    };
    let Some(rest) = rest.strip_prefix(command) else {
        return false;
    };
    rest.is_empty() || rest.starts_with('@') || rest.starts_with(char::is_whitespace)
}
