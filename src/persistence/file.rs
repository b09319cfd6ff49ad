use super::{PersistenceError, PersistenceResult};
use crate::book::TrainerBook;
use crate::client::Client;
use crate::prefs::Preferences;
use crate::schedule::{PaymentStatus, Schedule};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct BookSnapshot {
    clients: Vec<Client>,
    sessions: Vec<Session>,
    schedules: Vec<Schedule>,
}

impl BookSnapshot {
    fn from_book(book: &TrainerBook) -> Self {
        Self {
            clients: book.clients().to_vec(),
            sessions: book.sessions().to_vec(),
            schedules: book.schedules().to_vec(),
        }
    }

    fn into_book(self) -> PersistenceResult<TrainerBook> {
        super::rebuild_book(self.clients, self.sessions, self.schedules)
    }
}

pub fn save_book_to_json<P: AsRef<Path>>(book: &TrainerBook, path: P) -> PersistenceResult<()> {
    let snapshot = BookSnapshot::from_book(book);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_book_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<TrainerBook> {
    let file = File::open(path)?;
    let snapshot: BookSnapshot = serde_json::from_reader(file)?;
    snapshot.into_book()
}

pub fn save_preferences_to_json<P: AsRef<Path>>(
    preferences: &Preferences,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, preferences)?;
    Ok(())
}

pub fn load_preferences_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Preferences> {
    let file = File::open(path)?;
    let preferences = serde_json::from_reader(file)?;
    Ok(preferences)
}

/// One row of the flattened schedule report. The client name and session
/// columns are denormalized for the reader's benefit; only the identifying
/// and metadata columns are read back on import.
#[derive(Serialize, Deserialize)]
struct ScheduleCsvRecord {
    client_email: String,
    client_name: String,
    session_id: i32,
    start_time: String,
    exercise_type: String,
    payment: String,
    remark: String,
    weight_kg: String,
}

impl ScheduleCsvRecord {
    fn from_book(book: &TrainerBook, schedule: &Schedule) -> Self {
        let client_name = book
            .client(&schedule.client_email)
            .map(|client| client.name.clone())
            .unwrap_or_default();
        let (start_time, exercise_type) = book
            .session(schedule.session_id)
            .map(|session| {
                (
                    session.start_time.format("%Y-%m-%d %H:%M").to_string(),
                    session.exercise_type.clone(),
                )
            })
            .unwrap_or_default();
        Self {
            client_email: schedule.client_email.clone(),
            client_name,
            session_id: schedule.session_id,
            start_time,
            exercise_type,
            payment: schedule.payment.as_str().to_string(),
            remark: schedule.remark.clone(),
            weight_kg: format_option_f64(schedule.weight_kg),
        }
    }

    fn into_schedule(self) -> PersistenceResult<Schedule> {
        let payment = PaymentStatus::from_str(self.payment.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid payment status '{}'", self.payment))
        })?;
        Ok(Schedule {
            client_email: self.client_email,
            session_id: self.session_id,
            payment,
            remark: self.remark,
            weight_kg: parse_f64(&self.weight_kg)?,
        })
    }
}

pub fn save_schedules_to_csv<P: AsRef<Path>>(book: &TrainerBook, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for schedule in book.schedules() {
        writer.serialize(ScheduleCsvRecord::from_book(book, schedule))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_schedules_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Schedule>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut schedules = Vec::new();
    for record in reader.deserialize::<ScheduleCsvRecord>() {
        let record = record?;
        schedules.push(record.into_schedule()?);
    }
    Ok(schedules)
}

fn format_option_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_f64(input: &str) -> PersistenceResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid float '{input}': {e}")))
}
