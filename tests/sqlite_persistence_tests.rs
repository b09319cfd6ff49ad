#![cfg(feature = "sqlite")]

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;
use trainer_book::{
    BookStore, Client, PaymentStatus, Schedule, Session, SqliteBookStore, TrainerBook,
};

fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn build_sample_book() -> TrainerBook {
    let mut book = TrainerBook::new();
    book.add_client(Client::new("amy@example.com", "Amy Bell")).unwrap();
    book.add_client(Client::new("ben@example.com", "Ben Ong")).unwrap();
    book.add_session(Session::new(1, dt(2025, 2, 3, 18), 60, "endurance")).unwrap();
    book.add_session(Session::new(2, dt(2025, 2, 10, 18), 45, "strength")).unwrap();

    let mut schedule = Schedule::new("amy@example.com", 2);
    schedule.payment = PaymentStatus::Paid;
    schedule.weight_kg = Some(60.2);
    book.add_schedule(schedule).unwrap();
    book
}

#[test]
fn fresh_store_loads_nothing() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteBookStore::new(file.path()).unwrap();
    assert!(store.load_book().unwrap().is_none());
}

#[test]
fn save_and_load_round_trip() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteBookStore::new(file.path()).unwrap();
    let book = build_sample_book();

    store.save_book(&book).unwrap();
    let loaded = store.load_book().unwrap().expect("book should be stored");

    assert_eq!(loaded.clients(), book.clients());
    assert_eq!(loaded.sessions(), book.sessions());
    assert_eq!(loaded.schedules(), book.schedules());
}

#[test]
fn saved_empty_book_is_distinct_from_never_saved() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteBookStore::new(file.path()).unwrap();

    store.save_book(&TrainerBook::new()).unwrap();
    let loaded = store.load_book().unwrap().expect("empty book should be stored");
    assert!(loaded.clients().is_empty());
    assert!(loaded.sessions().is_empty());
    assert!(loaded.schedules().is_empty());
}

#[test]
fn save_replaces_the_previous_snapshot() {
    let file = NamedTempFile::new().unwrap();
    let store = SqliteBookStore::new(file.path()).unwrap();

    store.save_book(&build_sample_book()).unwrap();

    let mut smaller = TrainerBook::new();
    smaller.add_client(Client::new("cara@example.com", "Cara Lim")).unwrap();
    store.save_book(&smaller).unwrap();

    let loaded = store.load_book().unwrap().expect("book should be stored");
    assert_eq!(loaded.clients().len(), 1);
    assert_eq!(loaded.clients()[0].email, "cara@example.com");
    assert!(loaded.schedules().is_empty());
}

#[test]
fn store_reopens_from_the_same_file() {
    let file = NamedTempFile::new().unwrap();
    {
        let store = SqliteBookStore::new(file.path()).unwrap();
        store.save_book(&build_sample_book()).unwrap();
    }
    let reopened = SqliteBookStore::new(file.path()).unwrap();
    let loaded = reopened.load_book().unwrap().expect("book should persist");
    assert_eq!(loaded.clients().len(), 2);
}
