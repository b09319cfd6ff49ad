pub mod book;
pub mod client;
pub mod filter;
pub mod period;
pub mod persistence;
pub mod prefs;
pub mod reschedule;
pub mod schedule;
pub mod session;

pub use book::{BookError, BookResult, TrainerBook};
pub use client::{Client, WeightUnit};
pub use filter::{filter_sessions_by_period, schedules_for_client, weight_history};
pub use period::{DateWindow, Period, PeriodUnit};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteBookStore;
pub use persistence::{
    BookStore, PersistenceError, PersistenceResult, load_book_from_json,
    load_preferences_from_json, load_schedules_from_csv, save_book_to_json,
    save_preferences_to_json, save_schedules_to_csv,
};
pub use prefs::Preferences;
pub use reschedule::{Reschedule, RescheduleError, RescheduleRequest, resolve_edit};
pub use schedule::{PaymentStatus, Schedule, ScheduleKey};
pub use session::Session;
