use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime};
use trainer_book::{
    Client, Period, Schedule, Session, TrainerBook, WeightUnit, filter_sessions_by_period,
    schedules_for_client, weight_history,
};

fn at_ten(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(10, 0, 0).unwrap()
}

/// Sessions dated relative to the real current day, the way the interactive
/// views are: one a week ago, one today, one tomorrow, one two months out,
/// plus two fixed dates in the past.
fn scenario_sessions(today: NaiveDate) -> Vec<Session> {
    let fixed_early = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
    let fixed_late = NaiveDate::from_ymd_opt(2020, 11, 20).unwrap();
    vec![
        Session::new(1, at_ten(fixed_early), 60, "getwell"),
        Session::new(2, at_ten(today - Duration::days(7)), 60, "machoman"),
        Session::new(3, at_ten(today), 60, "machoman"),
        Session::new(4, at_ten(today + Duration::days(1)), 60, "machoman"),
        Session::new(5, at_ten(today.checked_add_months(Months::new(2)).unwrap()), 60, "machoman"),
        Session::new(6, at_ten(fixed_late), 60, "endurance"),
    ]
}

fn ids(sessions: &[Session]) -> Vec<i32> {
    sessions.iter().map(|s| s.id).collect()
}

#[test]
fn all_period_returns_every_session_in_original_order() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    let window = Period::parse("ALL").window(today);
    assert_eq!(ids(&filter_sessions_by_period(&sessions, &window)), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn plus_one_day_returns_today_and_tomorrow_in_order() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    let window = Period::parse("+1D").window(today);
    assert_eq!(ids(&filter_sessions_by_period(&sessions, &window)), vec![3, 4]);
}

#[test]
fn plus_zero_days_returns_only_today() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    for token in ["+0D", "-0D"] {
        let window = Period::parse(token).window(today);
        assert_eq!(ids(&filter_sessions_by_period(&sessions, &window)), vec![3]);
    }
}

#[test]
fn minus_one_week_returns_last_week_and_today() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    let window = Period::parse("-1w").window(today);
    assert_eq!(ids(&filter_sessions_by_period(&sessions, &window)), vec![2, 3]);
}

#[test]
fn plus_two_months_includes_the_far_session() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    let window = Period::parse("+2M").window(today);
    assert_eq!(ids(&filter_sessions_by_period(&sessions, &window)), vec![3, 4, 5]);
}

#[test]
fn future_period_drops_everything_before_today() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    let window = Period::parse("FUTURE").window(today);
    assert_eq!(ids(&filter_sessions_by_period(&sessions, &window)), vec![3, 4, 5]);
}

#[test]
fn filtering_does_not_touch_the_input() {
    let today = Local::now().date_naive();
    let sessions = scenario_sessions(today);
    let before = sessions.clone();
    let _ = filter_sessions_by_period(&sessions, &Period::parse("+0D").window(today));
    assert_eq!(sessions, before);
}

fn book_with_history() -> TrainerBook {
    let mut book = TrainerBook::new();
    let mut amy = Client::new("amy@example.com", "Amy Bell");
    amy.weight_unit = WeightUnit::Pound;
    book.add_client(amy).unwrap();
    book.add_client(Client::new("ben@example.com", "Ben Ong")).unwrap();

    let base = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    for (id, offset) in [(1, 0i64), (2, 7), (3, 14)] {
        book.add_session(Session::new(id, at_ten(base + Duration::days(offset)), 60, "strength"))
            .unwrap();
    }

    // Inserted out of date order on purpose; the views sort.
    let mut third = Schedule::new("amy@example.com", 3);
    third.weight_kg = Some(59.0);
    book.add_schedule(third).unwrap();
    let mut first = Schedule::new("amy@example.com", 1);
    first.weight_kg = Some(61.0);
    book.add_schedule(first).unwrap();
    let second = Schedule::new("amy@example.com", 2); // no reading taken
    book.add_schedule(second).unwrap();
    book.add_schedule(Schedule::new("ben@example.com", 2)).unwrap();
    book
}

#[test]
fn client_schedule_view_is_newest_first() {
    let book = book_with_history();
    let sessions: Vec<i32> = schedules_for_client(&book, "amy@example.com")
        .iter()
        .map(|s| s.session_id)
        .collect();
    assert_eq!(sessions, vec![3, 2, 1]);
}

#[test]
fn weight_history_is_chronological_and_skips_missing_readings() {
    let book = book_with_history();
    let history = weight_history(&book, "amy@example.com", WeightUnit::Kilogram);
    let readings: Vec<f64> = history.iter().map(|(_, w)| *w).collect();
    assert_eq!(readings, vec![61.0, 59.0]);
}

#[test]
fn weight_history_converts_to_pounds() {
    let book = book_with_history();
    let history = weight_history(&book, "amy@example.com", WeightUnit::Pound);
    assert!((history[0].1 - 61.0 * 2.2046226218).abs() < 1e-9);
}
