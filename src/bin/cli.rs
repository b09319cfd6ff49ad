use chrono::{Local, NaiveDateTime};
use std::io::{self, Write};
use std::path::PathBuf;
use trainer_book::{
    Client, PaymentStatus, Period, RescheduleRequest, Schedule, ScheduleKey, Session, TrainerBook,
    WeightUnit, filter_sessions_by_period, load_book_from_json, load_preferences_from_json,
    resolve_edit, save_book_to_json, save_preferences_to_json, save_schedules_to_csv,
    schedules_for_client, weight_history,
};

const PREFS_FILE: &str = "trainer-book-prefs.json";

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  clients                            List clients\n  sessions                           List sessions in the current period view\n  schedules                          List schedules\n  view <period>                      Set the session period view (+2M, -1w, ALL, WEEK, FUTURE)\n  addclient <email> <name...>        Add a client\n  addsession <id> <YYYY-MM-DDTHH:MM> <minutes> <exercise...>\n                                     Add a session\n  removeclient <email>               Remove a client and their schedules\n  removesession <id>                 Remove a session and its schedules\n  schedule <email> <session id>      Book a client into a session\n  editschedule <client#> <session#> [new session#]\n                                     Move a booking, by view positions\n  pay <email> <session id>           Mark a booking paid\n  remark <email> <session id> <text...>\n                                     Set a booking remark\n  weigh <email> <session id> <kg>    Record a weight reading\n  progress <email>                   Show a client's weight history\n  unit <kg|lb>                       Set the preferred weight unit\n  save [path]                        Save the book as JSON\n  load [path]                        Load the book from JSON\n  export <path>                      Export the schedule report as CSV\n  quit|exit                          Exit"
    );
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push('|');
    for (i, name) in headers.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        out.push_str(&" ".repeat(widths[i] - name.len()));
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    for row in rows {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn client_view(book: &TrainerBook) -> Vec<Client> {
    book.clients().to_vec()
}

fn session_view(book: &TrainerBook, period: Period) -> Vec<Session> {
    let window = period.window(Local::now().date_naive());
    filter_sessions_by_period(book.sessions(), &window)
}

fn render_clients(view: &[Client]) -> String {
    let rows: Vec<Vec<String>> = view
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                (i + 1).to_string(),
                c.email.clone(),
                c.name.clone(),
                c.phone.clone(),
                c.tags.join(","),
            ]
        })
        .collect();
    render_table(&["#", "email", "name", "phone", "tags"], &rows)
}

fn render_sessions(view: &[Session]) -> String {
    let rows: Vec<Vec<String>> = view
        .iter()
        .enumerate()
        .map(|(i, s)| {
            vec![
                (i + 1).to_string(),
                s.id.to_string(),
                s.start_time.format("%Y-%m-%d %H:%M").to_string(),
                s.duration_minutes.to_string(),
                s.exercise_type.clone(),
            ]
        })
        .collect();
    render_table(&["#", "id", "start", "minutes", "exercise"], &rows)
}

fn render_schedules(book: &TrainerBook) -> String {
    let rows: Vec<Vec<String>> = book
        .schedules()
        .iter()
        .map(|s| {
            let start = book
                .session(s.session_id)
                .map(|session| session.start_time.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            vec![
                s.client_email.clone(),
                s.session_id.to_string(),
                start,
                s.payment.as_str().to_string(),
                s.remark.clone(),
                s.weight_kg.map(|w| w.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    render_table(
        &["client", "session", "start", "payment", "remark", "weight_kg"],
        &rows,
    )
}

fn update_schedule<F>(book: &mut TrainerBook, email: &str, session_id: i32, apply: F)
where
    F: FnOnce(&mut Schedule),
{
    let key = ScheduleKey {
        client_email: email.to_string(),
        session_id,
    };
    match book.schedule(&key).cloned() {
        Some(mut schedule) => {
            apply(&mut schedule);
            match book.set_schedule(&key, schedule) {
                Ok(()) => println!("Schedule updated."),
                Err(e) => println!("Error: {e}"),
            }
        }
        None => println!("Error: no schedule for {key}"),
    }
}

fn main() {
    let mut book = TrainerBook::new();
    let mut period = Period::All;
    let mut preferences = load_preferences_from_json(PREFS_FILE).unwrap_or_default();

    println!("Trainer Book (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "clients" => print!("{}", render_clients(&client_view(&book))),
            "sessions" => print!("{}", render_sessions(&session_view(&book, period))),
            "schedules" => print!("{}", render_schedules(&book)),
            "view" => match parts.next() {
                Some(token) if Period::is_valid(token) => {
                    period = Period::parse(token);
                    print!("{}", render_sessions(&session_view(&book, period)));
                }
                Some(token) => println!("Invalid period '{token}' (try +2M, -1w, ALL, WEEK, FUTURE)"),
                None => println!("Usage: view <period>"),
            },
            "addclient" => {
                let email = parts.next();
                let name: Vec<&str> = parts.collect();
                match (email, !name.is_empty()) {
                    (Some(email), true) => {
                        match book.add_client(Client::new(email, name.join(" "))) {
                            Ok(()) => println!("Client added."),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: addclient <email> <name...>"),
                }
            }
            "addsession" => {
                let id_s = parts.next();
                let start_s = parts.next();
                let minutes_s = parts.next();
                let exercise: Vec<&str> = parts.collect();
                match (id_s, start_s, minutes_s) {
                    (Some(id_s), Some(start_s), Some(minutes_s)) => {
                        let id: i32 = match id_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid id");
                                continue;
                            }
                        };
                        let start = match NaiveDateTime::parse_from_str(start_s, "%Y-%m-%dT%H:%M") {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid start (YYYY-MM-DDTHH:MM)");
                                continue;
                            }
                        };
                        let minutes: i64 = match minutes_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid minutes");
                                continue;
                            }
                        };
                        match book.add_session(Session::new(id, start, minutes, exercise.join(" ")))
                        {
                            Ok(()) => println!("Session added."),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: addsession <id> <YYYY-MM-DDTHH:MM> <minutes> <exercise...>"),
                }
            }
            "removeclient" => match parts.next() {
                Some(email) => match book.remove_client(email) {
                    Ok(client) => println!("Removed {} and their schedules.", client.email),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: removeclient <email>"),
            },
            "removesession" => match parts.next().and_then(|s| s.parse::<i32>().ok()) {
                Some(id) => match book.remove_session(id) {
                    Ok(session) => println!("Removed session {} and its schedules.", session.id),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: removesession <id>"),
            },
            "schedule" => {
                let email = parts.next();
                let id = parts.next().and_then(|s| s.parse::<i32>().ok());
                match (email, id) {
                    (Some(email), Some(id)) => match book.add_schedule(Schedule::new(email, id)) {
                        Ok(()) => println!("Schedule added."),
                        Err(e) => println!("Error: {e}"),
                    },
                    _ => println!("Usage: schedule <email> <session id>"),
                }
            }
            "editschedule" => {
                let client_index = parts.next().and_then(|s| s.parse::<usize>().ok());
                let session_index = parts.next().and_then(|s| s.parse::<usize>().ok());
                let updated_session_index = parts.next().and_then(|s| s.parse::<usize>().ok());
                match (client_index, session_index) {
                    (Some(client_index), Some(session_index)) => {
                        let clients = client_view(&book);
                        let sessions = session_view(&book, period);
                        let request = RescheduleRequest {
                            client_index,
                            session_index,
                            updated_session_index,
                        };
                        match resolve_edit(&book, &clients, &sessions, &request) {
                            Ok(reschedule) => match book.commit_reschedule(&reschedule) {
                                Ok(()) => {
                                    println!("Rescheduled {}.", reschedule.updated);
                                    print!("{}", render_schedules(&book));
                                }
                                Err(e) => println!("Error: {e}"),
                            },
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: editschedule <client#> <session#> [new session#]"),
                }
            }
            "pay" => {
                let email = parts.next();
                let id = parts.next().and_then(|s| s.parse::<i32>().ok());
                match (email, id) {
                    (Some(email), Some(id)) => {
                        update_schedule(&mut book, email, id, |s| s.payment = PaymentStatus::Paid)
                    }
                    _ => println!("Usage: pay <email> <session id>"),
                }
            }
            "remark" => {
                let email = parts.next();
                let id = parts.next().and_then(|s| s.parse::<i32>().ok());
                let text: Vec<&str> = parts.collect();
                match (email, id, !text.is_empty()) {
                    (Some(email), Some(id), true) => {
                        update_schedule(&mut book, email, id, |s| s.remark = text.join(" "))
                    }
                    _ => println!("Usage: remark <email> <session id> <text...>"),
                }
            }
            "weigh" => {
                let email = parts.next();
                let id = parts.next().and_then(|s| s.parse::<i32>().ok());
                let kg = parts.next().and_then(|s| s.parse::<f64>().ok());
                match (email, id, kg) {
                    (Some(email), Some(id), Some(kg)) => {
                        update_schedule(&mut book, email, id, |s| s.weight_kg = Some(kg))
                    }
                    _ => println!("Usage: weigh <email> <session id> <kg>"),
                }
            }
            "progress" => match parts.next() {
                Some(email) => {
                    let unit = preferences.weight_unit;
                    let rows: Vec<Vec<String>> = weight_history(&book, email, unit)
                        .into_iter()
                        .map(|(start, weight)| {
                            vec![
                                start.format("%Y-%m-%d %H:%M").to_string(),
                                format!("{weight:.1} {}", unit.as_str()),
                            ]
                        })
                        .collect();
                    print!("{}", render_table(&["session", "weight"], &rows));
                    let booked = schedules_for_client(&book, email).len();
                    println!("{booked} booking(s) on record.");
                }
                None => println!("Usage: progress <email>"),
            },
            "unit" => match parts.next().and_then(WeightUnit::from_str) {
                Some(unit) => {
                    preferences.weight_unit = unit;
                    match save_preferences_to_json(&preferences, PREFS_FILE) {
                        Ok(()) => println!("Preferred unit set to {}.", unit.as_str()),
                        Err(e) => println!("Error: {e}"),
                    }
                }
                None => println!("Usage: unit <kg|lb>"),
            },
            "save" => {
                let path = parts
                    .next()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| preferences.book_file.clone());
                match save_book_to_json(&book, &path) {
                    Ok(()) => println!("Book saved to {}.", path.display()),
                    Err(e) => println!("Error: {e}"),
                }
            }
            "load" => {
                let path = parts
                    .next()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| preferences.book_file.clone());
                match load_book_from_json(&path) {
                    Ok(loaded) => {
                        book = loaded;
                        println!("Book loaded from {}.", path.display());
                    }
                    Err(e) => println!("Error: {e}"),
                }
            }
            "export" => match parts.next() {
                Some(path) => match save_schedules_to_csv(&book, path) {
                    Ok(()) => println!("Schedule report exported to {path}."),
                    Err(e) => println!("Error: {e}"),
                },
                None => println!("Usage: export <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
