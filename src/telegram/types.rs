//! Outbound wire types

use serde::Serialize;

/// Inline keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// Total button count across all rows.
    #[allow(dead_code)] // Used in tests
    pub fn button_count(&self) -> usize {
        self.inline_keyboard.iter().map(Vec::len).sum()
    }
}

/// A single inline button: either a callback token or an external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            url: None,
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            url: Some(url.into()),
        }
    }
}

/// A fully specified outbound message, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
    /// Forum topic id, when replying inside a topic.
    pub thread_id: Option<i64>,
}

impl OutgoingMessage {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
            thread_id: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn in_thread(mut self, thread_id: Option<i64>) -> Self {
        self.thread_id = thread_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_button_serializes_without_url() {
        let button = InlineKeyboardButton::callback("Reserve", "reserve");
        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Reserve", "callback_data": "reserve"})
        );
    }

    #[test]
    fn url_button_serializes_without_callback_data() {
        let button = InlineKeyboardButton::url("Support", "https://t.me/axelforks");
        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Support", "url": "https://t.me/axelforks"})
        );
    }

    #[test]
    fn markup_nests_rows() {
        let markup = InlineKeyboardMarkup::new(vec![
            vec![InlineKeyboardButton::callback("1", "num_1")],
            vec![InlineKeyboardButton::callback("2", "num_2")],
        ]);
        assert_eq!(markup.button_count(), 2);
        let json = serde_json::to_value(&markup).unwrap();
        assert_eq!(json["inline_keyboard"][1][0]["callback_data"], "num_2");
    }
}
