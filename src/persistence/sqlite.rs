use super::{BookStore, PersistenceResult};
use crate::book::TrainerBook;
use crate::client::Client;
use crate::schedule::Schedule;
use crate::session::Session;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

const FORMAT_VERSION: i64 = 1;

/// Snapshot store over a SQLite file: one JSON row per entity, replaced
/// wholesale on every save. The `book_meta` row distinguishes a database
/// that has never been saved to from one holding an empty book.
pub struct SqliteBookStore {
    connection: Mutex<Connection>,
}

impl SqliteBookStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS book_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                format_version INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS clients (
                email TEXT PRIMARY KEY,
                client_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY,
                session_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS schedules (
                client_email TEXT NOT NULL,
                session_id INTEGER NOT NULL,
                schedule_json TEXT NOT NULL,
                PRIMARY KEY (client_email, session_id)
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_clients(tx: &rusqlite::Transaction, book: &TrainerBook) -> PersistenceResult<()> {
        tx.execute("DELETE FROM clients", [])?;
        let mut stmt = tx.prepare("INSERT INTO clients (email, client_json) VALUES (?1, ?2)")?;
        for client in book.clients() {
            let json = serde_json::to_string(client)?;
            stmt.execute(params![client.email, json])?;
        }
        Ok(())
    }

    fn save_sessions(tx: &rusqlite::Transaction, book: &TrainerBook) -> PersistenceResult<()> {
        tx.execute("DELETE FROM sessions", [])?;
        let mut stmt = tx.prepare("INSERT INTO sessions (id, session_json) VALUES (?1, ?2)")?;
        for session in book.sessions() {
            let json = serde_json::to_string(session)?;
            stmt.execute(params![session.id, json])?;
        }
        Ok(())
    }

    fn save_schedules(tx: &rusqlite::Transaction, book: &TrainerBook) -> PersistenceResult<()> {
        tx.execute("DELETE FROM schedules", [])?;
        let mut stmt = tx.prepare(
            "INSERT INTO schedules (client_email, session_id, schedule_json) VALUES (?1, ?2, ?3)",
        )?;
        for schedule in book.schedules() {
            let json = serde_json::to_string(schedule)?;
            stmt.execute(params![schedule.client_email, schedule.session_id, json])?;
        }
        Ok(())
    }

    fn load_json_column(
        connection: &Connection,
        query: &str,
    ) -> PersistenceResult<Vec<String>> {
        let mut stmt = connection.prepare(query)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }
}

impl BookStore for SqliteBookStore {
    fn save_book(&self, book: &TrainerBook) -> PersistenceResult<()> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM book_meta", [])?;
        tx.execute(
            "INSERT INTO book_meta (id, format_version) VALUES (1, ?1)",
            params![FORMAT_VERSION],
        )?;
        Self::save_clients(&tx, book)?;
        Self::save_sessions(&tx, book)?;
        Self::save_schedules(&tx, book)?;
        tx.commit()?;
        Ok(())
    }

    fn load_book(&self) -> PersistenceResult<Option<TrainerBook>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT format_version FROM book_meta WHERE id = 1")?;
        let version: Option<i64> = stmt.query_row([], |row| row.get(0)).optional()?;
        if version.is_none() {
            return Ok(None);
        }

        // rowid order is insertion order here, which is display order.
        let mut clients = Vec::new();
        for json in Self::load_json_column(&conn, "SELECT client_json FROM clients ORDER BY rowid")? {
            clients.push(serde_json::from_str::<Client>(&json)?);
        }
        let mut sessions = Vec::new();
        for json in Self::load_json_column(&conn, "SELECT session_json FROM sessions ORDER BY rowid")? {
            sessions.push(serde_json::from_str::<Session>(&json)?);
        }
        let mut schedules = Vec::new();
        for json in
            Self::load_json_column(&conn, "SELECT schedule_json FROM schedules ORDER BY rowid")?
        {
            schedules.push(serde_json::from_str::<Schedule>(&json)?);
        }

        super::rebuild_book(clients, sessions, schedules).map(Some)
    }
}
