//! Inbound Telegram update wire types
//!
//! Only the fields this bot reads; everything else in the payload is
//! ignored by serde.

use serde::Deserialize;

/// One webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[allow(dead_code)] // Present on every update; useful in trace logs
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[allow(dead_code)]
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    /// Forum topic the message was posted in, if any.
    #[serde(default)]
    pub message_thread_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    #[allow(dead_code)]
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_text_message_update() {
        let json = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "Jane", "username": "janedoe"},
                "chat": {"id": 42, "type": "private"},
                "date": 1717000000,
                "text": "/start"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/start"));
        assert_eq!(message.from.unwrap().username.as_deref(), Some("janedoe"));
    }

    #[test]
    fn deserializes_a_callback_query_update() {
        let json = r#"{
            "update_id": 11,
            "callback_query": {
                "id": "777",
                "from": {"id": 42, "is_bot": false, "first_name": "Jane"},
                "message": {"message_id": 6, "chat": {"id": 42, "type": "private"}, "date": 1717000001},
                "chat_instance": "abc",
                "data": "time_19:30"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("time_19:30"));
        assert_eq!(query.from.last_name, None);
        assert_eq!(query.message.unwrap().chat.id, 42);
    }

    #[test]
    fn tolerates_updates_of_other_kinds() {
        let json = r#"{"update_id": 12, "edited_message": {"message_id": 1}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.is_none());
        assert!(update.callback_query.is_none());
    }
}
