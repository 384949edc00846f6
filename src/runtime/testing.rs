//! Test doubles for dispatcher tests

use super::traits::{ReservationStore, Transport};
use crate::db::NewReservation;
use crate::telegram::OutgoingMessage;
use async_trait::async_trait;
use std::sync::Mutex;

/// Transport that records every outbound message.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<OutgoingMessage>>,
}

impl RecordingTransport {
    pub fn sent_to(&self, chat_id: i64) -> Vec<OutgoingMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|m| m.text.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), String> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Store whose inserts always fail.
pub struct FailingStore;

#[async_trait]
impl ReservationStore for FailingStore {
    async fn insert_reservation(&self, _reservation: &NewReservation) -> Result<i64, String> {
        Err("insert failed".to_string())
    }
}
