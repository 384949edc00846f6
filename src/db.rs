//! Reservation persistence
//!
//! A single append-only table. Rows are written exactly once at wizard
//! completion and never updated or deleted by the bot.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// SQL schema, applied idempotently on open.
const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS reservations (
    reservation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    full_name TEXT NOT NULL,
    restaurant_link TEXT,
    num_people INTEGER NOT NULL,
    date TEXT NOT NULL,
    reservation_time TEXT NOT NULL,
    notes TEXT
);
";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Reservation not found: {0}")]
    ReservationNotFound(i64),
}

pub type DbResult<T> = Result<T, DbError>;

/// A completed draft, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: i64,
    pub full_name: String,
    pub num_people: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub restaurant_link: Option<String>,
    pub notes: Option<String>,
}

impl NewReservation {
    /// Date as stored, `YYYY-MM-DD`.
    pub fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Time as stored, `HH:MM`.
    pub fn time_text(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// A stored reservation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub reservation_id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub restaurant_link: Option<String>,
    pub num_people: i64,
    pub date: String,
    pub reservation_time: String,
    pub notes: Option<String>,
}

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Append a reservation and return its assigned id.
    ///
    /// Ids are assigned by SQLite and increase monotonically.
    pub fn insert_reservation(&self, reservation: &NewReservation) -> DbResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO reservations (user_id, full_name, num_people, date, reservation_time, restaurant_link, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                reservation.user_id,
                reservation.full_name,
                reservation.num_people,
                reservation.date_text(),
                reservation.time_text(),
                reservation.restaurant_link,
                reservation.notes,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Fetch a reservation by id.
    #[allow(dead_code)] // Used in tests
    pub fn get_reservation(&self, reservation_id: i64) -> DbResult<Reservation> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT reservation_id, user_id, full_name, restaurant_link, num_people, date, reservation_time, notes
             FROM reservations WHERE reservation_id = ?1",
        )?;

        stmt.query_row(params![reservation_id], parse_reservation_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::ReservationNotFound(reservation_id)
                }
                other => DbError::Sqlite(other),
            })
    }

    /// All stored reservations in insertion order.
    #[allow(dead_code)] // Used in tests
    pub fn list_reservations(&self) -> DbResult<Vec<Reservation>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT reservation_id, user_id, full_name, restaurant_link, num_people, date, reservation_time, notes
             FROM reservations ORDER BY reservation_id ASC",
        )?;

        let rows = stmt.query_map([], parse_reservation_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }
}

fn parse_reservation_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    Ok(Reservation {
        reservation_id: row.get(0)?,
        user_id: row.get(1)?,
        full_name: row.get(2)?,
        restaurant_link: row.get(3)?,
        num_people: row.get(4)?,
        date: row.get(5)?,
        reservation_time: row.get(6)?,
        notes: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewReservation {
        NewReservation {
            user_id: 42,
            full_name: "Jane Doe".to_string(),
            num_people: 2,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            restaurant_link: Some("https://example.com/r/1".to_string()),
            notes: Some(String::new()),
        }
    }

    #[test]
    fn insert_and_get_reservation() {
        let db = Database::open_in_memory().unwrap();

        let id = db.insert_reservation(&sample()).unwrap();
        let stored = db.get_reservation(id).unwrap();

        assert_eq!(stored.reservation_id, id);
        assert_eq!(stored.user_id, 42);
        assert_eq!(stored.full_name, "Jane Doe");
        assert_eq!(stored.num_people, 2);
        assert_eq!(stored.date, "2025-06-01");
        assert_eq!(stored.reservation_time, "19:30");
        assert_eq!(
            stored.restaurant_link.as_deref(),
            Some("https://example.com/r/1")
        );
        assert_eq!(stored.notes.as_deref(), Some(""));
    }

    #[test]
    fn ids_increase_monotonically() {
        let db = Database::open_in_memory().unwrap();

        let first = db.insert_reservation(&sample()).unwrap();
        let second = db.insert_reservation(&sample()).unwrap();

        assert!(second > first);
        assert_eq!(db.list_reservations().unwrap().len(), 2);
    }

    #[test]
    fn missing_reservation_is_an_error() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.get_reservation(999),
            Err(DbError::ReservationNotFound(999))
        ));
    }

    #[test]
    fn schema_is_idempotent_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservation.db");

        let db = Database::open(&path).unwrap();
        let id = db.insert_reservation(&sample()).unwrap();
        drop(db);

        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.get_reservation(id).unwrap().full_name, "Jane Doe");
    }

    #[test]
    fn nullable_columns_round_trip_none() {
        let db = Database::open_in_memory().unwrap();
        let reservation = NewReservation {
            restaurant_link: None,
            notes: None,
            ..sample()
        };

        let id = db.insert_reservation(&reservation).unwrap();
        let stored = db.get_reservation(id).unwrap();
        assert_eq!(stored.restaurant_link, None);
        assert_eq!(stored.notes, None);
    }
}
