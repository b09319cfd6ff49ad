use crate::book::TrainerBook;
use crate::client::WeightUnit;
use crate::period::DateWindow;
use crate::schedule::Schedule;
use crate::session::Session;
use chrono::NaiveDateTime;

/// Sessions whose start date falls inside the window, in their original
/// relative order. An unbounded window returns every session unchanged.
pub fn filter_sessions_by_period(sessions: &[Session], window: &DateWindow) -> Vec<Session> {
    sessions
        .iter()
        .filter(|session| window.contains(session.start_date()))
        .cloned()
        .collect()
}

/// The schedules booking a client, ordered by session start time with the
/// most recent first. Used for the per-client schedule table.
pub fn schedules_for_client(book: &TrainerBook, email: &str) -> Vec<Schedule> {
    let mut entries: Vec<(NaiveDateTime, Schedule)> = book
        .schedules()
        .iter()
        .filter(|schedule| schedule.client_email == email)
        .filter_map(|schedule| {
            book.session(schedule.session_id)
                .map(|session| (session.start_time, schedule.clone()))
        })
        .collect();
    entries.sort_by_key(|(start, _)| *start);
    entries.reverse();
    entries.into_iter().map(|(_, schedule)| schedule).collect()
}

/// Chronological weight readings recorded for a client, converted to the
/// requested unit. Schedules without a reading are skipped.
pub fn weight_history(
    book: &TrainerBook,
    email: &str,
    unit: WeightUnit,
) -> Vec<(NaiveDateTime, f64)> {
    let mut readings: Vec<(NaiveDateTime, f64)> = book
        .schedules()
        .iter()
        .filter(|schedule| schedule.client_email == email)
        .filter_map(|schedule| {
            let weight_kg = schedule.weight_kg?;
            let session = book.session(schedule.session_id)?;
            Some((session.start_time, unit.from_kilograms(weight_kg)))
        })
        .collect();
    readings.sort_by_key(|(start, _)| *start);
    readings
}
