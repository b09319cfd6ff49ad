use crate::book::TrainerBook;
use crate::client::Client;
use crate::schedule::ScheduleKey;
use crate::session::Session;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescheduleError {
    InvalidClientIndex,
    InvalidSessionIndex,
    DuplicateSchedule,
}

impl fmt::Display for RescheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RescheduleError::InvalidClientIndex => {
                write!(f, "the client index provided is invalid")
            }
            RescheduleError::InvalidSessionIndex => {
                write!(f, "the session index provided is invalid")
            }
            RescheduleError::DuplicateSchedule => {
                write!(f, "this schedule overlaps with an existing schedule")
            }
        }
    }
}

impl std::error::Error for RescheduleError {}

/// An edit request as the user expresses it: 1-based positions in the
/// currently displayed client and session lists, plus the position of the
/// replacement session when one was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescheduleRequest {
    pub client_index: usize,
    pub session_index: usize,
    pub updated_session_index: Option<usize>,
}

/// A validated edit, resolved down to identity keys. Index resolution
/// happens exactly once, here; the commit works on keys alone, so the views
/// shifting after resolution can no longer redirect the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reschedule {
    pub current: ScheduleKey,
    pub updated: ScheduleKey,
}

fn view_entry<T>(view: &[T], one_based: usize) -> Option<&T> {
    one_based.checked_sub(1).and_then(|index| view.get(index))
}

/// Resolve an edit request against the current filtered views and validate
/// it against the store.
///
/// Checks run in a fixed order, because the order decides which error the
/// user sees first: client index bounds, then session index bounds (at
/// least one of the two session references must fall inside the view), then
/// overlap with another schedule in the store, then the same-session no-op,
/// which is rejected rather than silently accepted.
///
/// Pure with respect to `book`: identical inputs resolve identically, so a
/// caller may safely retry.
pub fn resolve_edit(
    book: &TrainerBook,
    client_view: &[Client],
    session_view: &[Session],
    request: &RescheduleRequest,
) -> Result<Reschedule, RescheduleError> {
    let client = view_entry(client_view, request.client_index)
        .ok_or(RescheduleError::InvalidClientIndex)?;

    let session_in_range = view_entry(session_view, request.session_index).is_some();
    let updated_in_range = request
        .updated_session_index
        .is_some_and(|index| view_entry(session_view, index).is_some());
    if !session_in_range && !updated_in_range {
        return Err(RescheduleError::InvalidSessionIndex);
    }

    let session = view_entry(session_view, request.session_index)
        .ok_or(RescheduleError::InvalidSessionIndex)?;
    let updated_session = match request.updated_session_index {
        Some(index) => {
            view_entry(session_view, index).ok_or(RescheduleError::InvalidSessionIndex)?
        }
        None => session,
    };

    let current = ScheduleKey {
        client_email: client.email.clone(),
        session_id: session.id,
    };
    let updated = ScheduleKey {
        client_email: client.email.clone(),
        session_id: updated_session.id,
    };

    if updated != current && book.has_schedule(&updated) {
        return Err(RescheduleError::DuplicateSchedule);
    }
    if updated_session.id == session.id {
        return Err(RescheduleError::DuplicateSchedule);
    }

    Ok(Reschedule { current, updated })
}
