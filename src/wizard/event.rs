//! Events that drive the wizard

/// Inbound events, already stripped of transport framing.
#[derive(Debug, Clone)]
pub enum Event {
    /// `/start`: unconditional reset plus the main menu.
    Start,
    /// Structured selection carrying a callback token.
    Selection { token: String },
    /// Free-text message.
    Text { text: String },
}

impl Event {
    pub fn selection(token: impl Into<String>) -> Self {
        Event::Selection {
            token: token.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Event::Text { text: text.into() }
    }
}

/// Who sent the update, as reported by the transport.
///
/// `chat_id` is where replies go; the identity fields feed the admin
/// notification at completion.
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: i64,
    pub chat_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Requester {
    /// "First Last" with a missing last name elided.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }

    /// `@username`, or a placeholder when the account has none.
    pub fn handle(&self) -> String {
        match self.username.as_deref() {
            Some(username) => format!("@{username}"),
            None => "No username".to_string(),
        }
    }
}
