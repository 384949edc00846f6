//! Inline keyboard builders

use super::effect::KeyboardSpec;
use crate::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};
use chrono::{Days, NaiveDate};

pub const SUPPORT_URL: &str = "https://t.me/axelforks";
pub const BOT_URL: &str = "https://t.me/axel_fork_bot";

/// Days offered by the date picker, starting today.
const DATE_WINDOW_DAYS: u64 = 7;

/// Render a keyboard spec. `today` anchors the rolling date window.
pub fn render(spec: KeyboardSpec, today: NaiveDate) -> InlineKeyboardMarkup {
    match spec {
        KeyboardSpec::MainMenu => main_menu(),
        KeyboardSpec::DatePicker => date_picker(today),
        KeyboardSpec::TimeGrid => time_grid(),
        KeyboardSpec::PartySize => party_size(),
    }
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Reserve", "reserve"),
        InlineKeyboardButton::url("Support", SUPPORT_URL),
    ]])
}

/// One button per day for the next week; label `%b %d`, token `YYYY-MM-DD`.
pub fn date_picker(today: NaiveDate) -> InlineKeyboardMarkup {
    let rows = (0..DATE_WINDOW_DAYS)
        .map(|offset| {
            let date = today + Days::new(offset);
            vec![InlineKeyboardButton::callback(
                date.format("%b %d").to_string(),
                date.format("%Y-%m-%d").to_string(),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Every 15 minutes from 09:00 through 22:45, four slots per row.
pub fn time_grid() -> InlineKeyboardMarkup {
    let rows = (9..=22)
        .map(|hour| {
            [0, 15, 30, 45]
                .iter()
                .map(|minute| {
                    let label = format!("{hour:02}:{minute:02}");
                    InlineKeyboardButton::callback(label.clone(), format!("time_{label}"))
                })
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Quick-pick 1 through 5 plus "Other", three per row.
pub fn party_size() -> InlineKeyboardMarkup {
    let mut buttons: Vec<InlineKeyboardButton> = (1..=5)
        .map(|n| InlineKeyboardButton::callback(n.to_string(), format!("num_{n}")))
        .collect();
    buttons.push(InlineKeyboardButton::callback("Other", "num_other"));

    let rows = buttons.chunks(3).map(<[_]>::to_vec).collect();
    InlineKeyboardMarkup::new(rows)
}

/// Deep-link button used by `/panel` in group chats.
pub fn panel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::url(
        "🍴 Start a Reservation",
        BOT_URL,
    )]])
}
