use crate::book::{BookError, TrainerBook};
use crate::client::Client;
use crate::schedule::Schedule;
use crate::session::Session;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Book(BookError),
    InvalidData(String),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Book(err) => write!(f, "invalid book data: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::NotFound => write!(f, "no book stored"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<BookError> for PersistenceError {
    fn from(value: BookError) -> Self {
        Self::Book(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait BookStore {
    fn save_book(&self, book: &TrainerBook) -> PersistenceResult<()>;
    fn load_book(&self) -> PersistenceResult<Option<TrainerBook>>;
}

/// Rebuild a book from persisted collections, re-running the store's
/// uniqueness and reference checks. A duplicate or dangling entry surfaces
/// as a `Book` error naming the offending collection and key.
pub fn rebuild_book(
    clients: Vec<Client>,
    sessions: Vec<Session>,
    schedules: Vec<Schedule>,
) -> PersistenceResult<TrainerBook> {
    let mut book = TrainerBook::new();
    for client in clients {
        book.add_client(client)?;
    }
    for session in sessions {
        book.add_session(session)?;
    }
    for schedule in schedules {
        book.add_schedule(schedule)?;
    }
    Ok(book)
}

#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod file;

pub use file::{
    load_book_from_json, load_preferences_from_json, load_schedules_from_csv, save_book_to_json,
    save_preferences_to_json, save_schedules_to_csv,
};
