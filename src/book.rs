use crate::client::Client;
use crate::reschedule::Reschedule;
use crate::schedule::{Schedule, ScheduleKey};
use crate::session::Session;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum BookError {
    DuplicateClient(String),
    DuplicateSession(i32),
    DuplicateSchedule(ScheduleKey),
    UnknownClient(String),
    UnknownSession(i32),
    ScheduleNotFound(ScheduleKey),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::DuplicateClient(email) => {
                write!(f, "clients list already contains email '{email}'")
            }
            BookError::DuplicateSession(id) => {
                write!(f, "sessions list already contains id {id}")
            }
            BookError::DuplicateSchedule(key) => {
                write!(f, "schedules list already contains {key}")
            }
            BookError::UnknownClient(email) => {
                write!(f, "no client with email '{email}'")
            }
            BookError::UnknownSession(id) => write!(f, "no session with id {id}"),
            BookError::ScheduleNotFound(key) => write!(f, "no schedule for {key}"),
        }
    }
}

impl std::error::Error for BookError {}

pub type BookResult<T> = Result<T, BookError>;

/// Canonical store of clients, sessions and schedules.
///
/// Three invariants hold at all times: client emails are unique, session
/// ids are unique, and no two schedules book the same (client, session)
/// pair. Every schedule references a client and a session present in the
/// store. Each mutating operation validates fully before touching any
/// collection; a failed call leaves the store unchanged.
///
/// Collections preserve insertion order, which is also display order.
/// Filtered views handed out earlier are not updated by mutations;
/// consumers re-query after every commit.
#[derive(Debug, Default, Clone)]
pub struct TrainerBook {
    clients: Vec<Client>,
    sessions: Vec<Session>,
    schedules: Vec<Schedule>,
}

impl TrainerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client(&mut self, client: Client) -> BookResult<()> {
        if self.has_client(&client.email) {
            return Err(BookError::DuplicateClient(client.email));
        }
        self.clients.push(client);
        Ok(())
    }

    pub fn has_client(&self, email: &str) -> bool {
        self.clients.iter().any(|c| c.email == email)
    }

    pub fn client(&self, email: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.email == email)
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Remove a client and every schedule that books them.
    pub fn remove_client(&mut self, email: &str) -> BookResult<Client> {
        let position = self
            .clients
            .iter()
            .position(|c| c.email == email)
            .ok_or_else(|| BookError::UnknownClient(email.to_string()))?;
        let client = self.clients.remove(position);
        self.schedules.retain(|s| s.client_email != email);
        Ok(client)
    }

    pub fn add_session(&mut self, session: Session) -> BookResult<()> {
        if self.has_session(session.id) {
            return Err(BookError::DuplicateSession(session.id));
        }
        self.sessions.push(session);
        Ok(())
    }

    pub fn has_session(&self, id: i32) -> bool {
        self.sessions.iter().any(|s| s.id == id)
    }

    pub fn session(&self, id: i32) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Remove a session and every schedule that books it.
    pub fn remove_session(&mut self, id: i32) -> BookResult<Session> {
        let position = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or(BookError::UnknownSession(id))?;
        let session = self.sessions.remove(position);
        self.schedules.retain(|s| s.session_id != id);
        Ok(session)
    }

    pub fn add_schedule(&mut self, schedule: Schedule) -> BookResult<()> {
        if !self.has_client(&schedule.client_email) {
            return Err(BookError::UnknownClient(schedule.client_email));
        }
        if !self.has_session(schedule.session_id) {
            return Err(BookError::UnknownSession(schedule.session_id));
        }
        let key = schedule.key();
        if self.has_schedule(&key) {
            return Err(BookError::DuplicateSchedule(key));
        }
        self.schedules.push(schedule);
        Ok(())
    }

    pub fn has_schedule(&self, key: &ScheduleKey) -> bool {
        self.schedules.iter().any(|s| s.key() == *key)
    }

    pub fn schedule(&self, key: &ScheduleKey) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.key() == *key)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Replace the schedule identified by `target` in place, keeping its
    /// display position. The replacement must reference known entities and
    /// must not collide with any schedule other than the target itself.
    pub fn set_schedule(&mut self, target: &ScheduleKey, replacement: Schedule) -> BookResult<()> {
        let position = self
            .schedules
            .iter()
            .position(|s| s.key() == *target)
            .ok_or_else(|| BookError::ScheduleNotFound(target.clone()))?;
        if !self.has_client(&replacement.client_email) {
            return Err(BookError::UnknownClient(replacement.client_email));
        }
        if !self.has_session(replacement.session_id) {
            return Err(BookError::UnknownSession(replacement.session_id));
        }
        let key = replacement.key();
        if key != *target && self.has_schedule(&key) {
            return Err(BookError::DuplicateSchedule(key));
        }
        self.schedules[position] = replacement;
        Ok(())
    }

    /// Commit a resolved reschedule: look the current schedule up again (the
    /// store may have changed since validation), carry its payment, remark
    /// and weight onto the updated pair, and replace it.
    pub fn commit_reschedule(&mut self, reschedule: &Reschedule) -> BookResult<()> {
        let mut replacement = self
            .schedule(&reschedule.current)
            .cloned()
            .ok_or_else(|| BookError::ScheduleNotFound(reschedule.current.clone()))?;
        replacement.client_email = reschedule.updated.client_email.clone();
        replacement.session_id = reschedule.updated.session_id;
        self.set_schedule(&reschedule.current, replacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn session(id: i32) -> Session {
        let start = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Session::new(id, start, 60, "strength")
    }

    #[test]
    fn add_schedule_requires_known_references() {
        let mut book = TrainerBook::new();
        book.add_client(Client::new("amy@example.com", "Amy")).unwrap();

        let err = book
            .add_schedule(Schedule::new("amy@example.com", 7))
            .unwrap_err();
        assert_eq!(err, BookError::UnknownSession(7));

        book.add_session(session(7)).unwrap();
        let err = book
            .add_schedule(Schedule::new("bob@example.com", 7))
            .unwrap_err();
        assert_eq!(err, BookError::UnknownClient("bob@example.com".into()));

        book.add_schedule(Schedule::new("amy@example.com", 7)).unwrap();
        assert_eq!(book.schedules().len(), 1);
    }

    #[test]
    fn failed_set_schedule_leaves_store_unchanged() {
        let mut book = TrainerBook::new();
        book.add_client(Client::new("amy@example.com", "Amy")).unwrap();
        book.add_session(session(1)).unwrap();
        book.add_schedule(Schedule::new("amy@example.com", 1)).unwrap();

        let target = ScheduleKey {
            client_email: "amy@example.com".into(),
            session_id: 1,
        };
        let err = book
            .set_schedule(&target, Schedule::new("amy@example.com", 99))
            .unwrap_err();
        assert_eq!(err, BookError::UnknownSession(99));
        assert_eq!(book.schedule(&target).unwrap().session_id, 1);
    }
}
