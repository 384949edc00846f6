//! Pure wizard transition function
//!
//! Dispatches on (current session, event) and returns a session change plus
//! ordered effects. No I/O: persistence, sends, and pauses all come back as
//! effects for the runtime.

use super::effect::{Effect, KeyboardSpec};
use super::event::{Event, Requester};
use super::messages;
use super::state::{Session, Step};

/// Result of a wizard transition
#[derive(Debug)]
pub struct TransitionResult {
    pub session: SessionChange,
    pub effects: Vec<Effect>,
}

/// What to do with the stored session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionChange {
    Keep,
    Put(Session),
    Clear,
}

impl TransitionResult {
    pub fn new(session: SessionChange) -> Self {
        Self {
            session,
            effects: vec![],
        }
    }

    fn keep() -> Self {
        Self::new(SessionChange::Keep)
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function.
///
/// `session` is the caller's current view of this user's draft; absence is
/// the idle state. `requester` feeds the admin notification at completion.
pub fn transition(
    session: Option<&Session>,
    requester: &Requester,
    event: Event,
) -> TransitionResult {
    match event {
        // Reset: any prior session is discarded unconditionally.
        Event::Start => TransitionResult::new(SessionChange::Clear)
            .with_effect(Effect::reply_with(messages::WELCOME, KeyboardSpec::MainMenu)),

        Event::Selection { token } => on_selection(session, &token),

        Event::Text { text } => on_text(session, requester, &text),
    }
}

fn on_selection(session: Option<&Session>, token: &str) -> TransitionResult {
    // "reserve" (re)enters the flow; an in-flight draft keeps its fields but
    // is rewound to the date step.
    if token == "reserve" {
        let mut next = session.cloned().unwrap_or_default();
        next.step = Step::AwaitDate;
        return TransitionResult::new(SessionChange::Put(next))
            .with_effect(Effect::reply_with(messages::PROMPT_DATE, KeyboardSpec::DatePicker));
    }

    let Some(session) = session else {
        // Stale callback after completion or reset.
        return if is_wizard_token(token) {
            guidance()
        } else {
            TransitionResult::keep()
        };
    };

    if is_date_token(token) {
        if session.step != Step::AwaitDate {
            return guidance();
        }
        let mut next = session.clone();
        next.draft.date = Some(token.to_string());
        next.step = Step::AwaitTime;
        return TransitionResult::new(SessionChange::Put(next))
            .with_effect(Effect::reply_with(messages::prompt_time(token), KeyboardSpec::TimeGrid));
    }

    if let Some(time) = token.strip_prefix("time_") {
        if session.step != Step::AwaitTime {
            return guidance();
        }
        let mut next = session.clone();
        next.draft.time = Some(time.to_string());
        next.step = Step::AwaitName;
        return TransitionResult::new(SessionChange::Put(next))
            .with_effect(Effect::reply(messages::PROMPT_NAME));
    }

    if let Some(pick) = token.strip_prefix("num_") {
        if session.step != Step::AwaitPeople {
            return guidance();
        }
        if pick == "other" {
            // Converges with the quick-pick path via the free-text handler.
            return TransitionResult::keep()
                .with_effect(Effect::reply(messages::PROMPT_PEOPLE_COUNT));
        }
        let Ok(num_people) = pick.parse::<i64>() else {
            return TransitionResult::keep();
        };
        return record_people(session, num_people);
    }

    // Unrecognized token shapes are dropped, matching the original handler.
    TransitionResult::keep()
}

fn on_text(session: Option<&Session>, requester: &Requester, text: &str) -> TransitionResult {
    let Some(session) = session else {
        return guidance();
    };
    let input = text.trim();

    match session.step {
        // Only button input is meaningful here; free text had no handler in
        // the original flow either.
        Step::AwaitDate | Step::AwaitTime => TransitionResult::keep(),

        Step::AwaitName => {
            let mut next = session.clone();
            next.draft.full_name = Some(input.to_string());
            next.step = Step::AwaitPeople;
            TransitionResult::new(SessionChange::Put(next))
                .with_effect(Effect::reply_with(messages::PROMPT_PEOPLE, KeyboardSpec::PartySize))
        }

        // Accepts any integer, including zero and negatives; re-prompts
        // forever on parse failure.
        Step::AwaitPeople => match input.parse::<i64>() {
            Ok(num_people) => record_people(session, num_people),
            Err(_) => {
                TransitionResult::keep().with_effect(Effect::reply(messages::PROMPT_PEOPLE_RETRY))
            }
        },

        Step::AwaitLink => {
            let mut next = session.clone();
            next.draft.restaurant_link = Some(input.to_string());
            next.step = Step::AwaitNotes;
            TransitionResult::new(SessionChange::Put(next))
                .with_effect(Effect::reply(messages::PROMPT_NOTES))
        }

        Step::AwaitNotes => complete(session, requester, input),
    }
}

/// Shared tail of the quick-pick and free-text party-size paths.
fn record_people(session: &Session, num_people: i64) -> TransitionResult {
    let mut next = session.clone();
    next.draft.num_people = Some(num_people);
    next.step = Step::AwaitLink;
    TransitionResult::new(SessionChange::Put(next)).with_effect(Effect::reply(messages::PROMPT_LINK))
}

/// Terminal step: persist, confirm in three paced messages, notify the
/// administrator, clear the session.
fn complete(session: &Session, requester: &Requester, notes: &str) -> TransitionResult {
    let mut draft = session.draft.clone();
    draft.notes = Some(notes.to_string());

    let Ok(reservation) = draft.complete(requester.user_id) else {
        // Only reachable with forged or truncated callback data; the draft
        // is unusable, so start over.
        return TransitionResult::new(SessionChange::Clear)
            .with_effect(Effect::reply(messages::GUIDANCE));
    };

    let confirmation = messages::confirmation(&reservation);
    let admin = messages::admin_notification(&reservation, requester);

    TransitionResult::new(SessionChange::Clear)
        .with_effect(Effect::SaveReservation { reservation })
        .with_effect(Effect::reply(confirmation))
        .with_effect(Effect::pause())
        .with_effect(Effect::reply(messages::CUSTOMER_FOLLOW_UP))
        .with_effect(Effect::pause())
        .with_effect(Effect::reply_with(messages::WELCOME, KeyboardSpec::MainMenu))
        .with_effect(Effect::NotifyAdmin { text: admin })
}

fn guidance() -> TransitionResult {
    TransitionResult::keep().with_effect(Effect::reply(messages::GUIDANCE))
}

/// Date tokens are validated by shape only: exactly ten bytes containing a
/// dash. The value set is constrained by the button keyboard, not here.
fn is_date_token(token: &str) -> bool {
    token.len() == 10 && token.contains('-')
}

fn is_wizard_token(token: &str) -> bool {
    is_date_token(token) || token.starts_with("time_") || token.starts_with("num_")
}
