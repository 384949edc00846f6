//! User-facing copy

use crate::db::NewReservation;
use crate::wizard::Requester;

pub const WELCOME: &str = "✨ Golden Fork Reservation ✨\nBook effortlessly. Save £50 instantly.";

pub const PANEL: &str = "✨ Golden Fork ✨\n\nClick below to start your reservation:";

/// Stale-callback / missing-session guidance.
pub const GUIDANCE: &str = "⚠️ Something went wrong. Please restart with /start.";

pub const PROMPT_DATE: &str = "Please select the date for your reservation:";

pub const PROMPT_NAME: &str =
    "Please enter the name you would like the reservation under (first and surname):";

pub const PROMPT_PEOPLE: &str = "How many people will attend?";

pub const PROMPT_PEOPLE_COUNT: &str = "Please enter the number of people:";

pub const PROMPT_PEOPLE_RETRY: &str = "Please enter a valid number.";

pub const PROMPT_LINK: &str = "Please paste the restaurant link:";

pub const PROMPT_NOTES: &str = "Any additional notes? (e.g., allergies, special requests)";

/// Shown when the reservation insert fails; the session is kept so
/// re-sending the notes retries.
pub const SAVE_RETRY: &str =
    "⚠️ We couldn't save your reservation just now. Please send your notes again to retry.";

pub const CUSTOMER_FOLLOW_UP: &str = "Thank you for choosing Golden Fork! 🍽️\n\n\
    💳 Once your payment is completed, we'll reach out privately with a screenshot of your \
    confirmed reservation, including the restaurant and time you selected.\n\n\
    📍 At the restaurant, simply mention you booked through TheFork. You may also mention \
    the Yums if you prefer, but restaurants usually apply them automatically.\n\n\
    💸 The discount will be applied to your final bill. If it's not, just kindly remind \
    your waiter. Enjoy your meal!";

pub fn prompt_time(date: &str) -> String {
    format!("Please select a time for {date}:")
}

fn reservation_summary(reservation: &NewReservation) -> String {
    format!(
        "📅 Date: {date}\n\
         ⏰ Time: {time}\n\
         🙍 Name: {name}\n\
         👫 People: {people}\n\
         📍 Restaurant: {link}\n\
         📝 Notes: {notes}",
        date = reservation.date_text(),
        time = reservation.time_text(),
        name = reservation.full_name,
        people = reservation.num_people,
        link = reservation.restaurant_link.as_deref().unwrap_or("No link"),
        notes = reservation.notes.as_deref().unwrap_or(""),
    )
}

pub fn confirmation(reservation: &NewReservation) -> String {
    format!(
        "🌟 Reservation locked in!\n\n{}\n\n\
         Our team will reach out shortly to arrange payment. We'll be swift, and of course \
         you're welcome to secure another table.",
        reservation_summary(reservation)
    )
}

pub fn admin_notification(reservation: &NewReservation, requester: &Requester) -> String {
    format!(
        "📩 New Reservation:\n\n{}\n\n👤 Telegram: {} ({})",
        reservation_summary(reservation),
        requester.display_name(),
        requester.handle(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn reservation() -> NewReservation {
        NewReservation {
            user_id: 42,
            full_name: "Jane Doe".to_string(),
            num_people: 2,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            restaurant_link: Some("https://example.com/r/1".to_string()),
            notes: Some("window seat".to_string()),
        }
    }

    fn requester() -> Requester {
        Requester {
            user_id: 42,
            chat_id: 42,
            first_name: "Jane".to_string(),
            last_name: Some("Doe".to_string()),
            username: Some("janedoe".to_string()),
        }
    }

    #[test]
    fn confirmation_lists_every_field() {
        let text = confirmation(&reservation());
        assert!(text.contains("📅 Date: 2025-06-01"));
        assert!(text.contains("⏰ Time: 19:30"));
        assert!(text.contains("🙍 Name: Jane Doe"));
        assert!(text.contains("👫 People: 2"));
        assert!(text.contains("📍 Restaurant: https://example.com/r/1"));
        assert!(text.contains("📝 Notes: window seat"));
    }

    #[test]
    fn missing_link_renders_placeholder() {
        let text = confirmation(&NewReservation {
            restaurant_link: None,
            ..reservation()
        });
        assert!(text.contains("📍 Restaurant: No link"));
    }

    #[test]
    fn admin_notification_carries_requester_identity() {
        let text = admin_notification(&reservation(), &requester());
        assert!(text.starts_with("📩 New Reservation:"));
        assert!(text.contains("👤 Telegram: Jane Doe (@janedoe)"));
    }
}
