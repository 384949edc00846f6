//! Trait abstractions for dispatcher I/O
//!
//! These traits enable testing the dispatcher with mock implementations.

use crate::db::{Database, NewReservation};
use crate::telegram::{BotApi, OutgoingMessage};
use async_trait::async_trait;

/// Outbound message delivery.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), String>;
}

/// Append-only reservation persistence.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a reservation and return its assigned id.
    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<i64, String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

use std::sync::Arc;

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), String> {
        (**self).send(message).await
    }
}

#[async_trait]
impl<T: ReservationStore + ?Sized> ReservationStore for Arc<T> {
    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<i64, String> {
        (**self).insert_reservation(reservation).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

#[async_trait]
impl Transport for BotApi {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), String> {
        self.send_message(message).await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl ReservationStore for Database {
    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<i64, String> {
        Database::insert_reservation(self, reservation).map_err(|e| e.to_string())
    }
}
