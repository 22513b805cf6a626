//! SQLite-based session storage and statistics.
//!
//! Provides persistent storage for:
//! - Completed study and break phases
//! - Progress statistics (daily and all-time)
//! - Key-value store for host state
//!
//! The timer never touches this module directly. [`SessionRecorder`] is an
//! observer that writes a row for each `CycleCompleted` event.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::events::Event;
use crate::host::TimerObserver;
use crate::timer::TimerMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub mode: TimerMode,
    pub duration_secs: u64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stats {
    pub study_sessions: u64,
    pub study_secs: u64,
    pub break_secs: u64,
    pub today_sessions: u64,
    pub today_study_secs: u64,
}

/// SQLite database for session storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/studytimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("studytimer.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                mode          TEXT NOT NULL,
                duration_secs INTEGER NOT NULL,
                completed_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_mode ON sessions(mode);",
        )?;
        Ok(())
    }

    /// Record a completed phase.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        mode: TimerMode,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO sessions (mode, duration_secs, completed_at)
             VALUES (?1, ?2, ?3)",
            params![mode.as_str(), duration_secs, completed_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent sessions first.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, duration_secs, completed_at
             FROM sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, mode, duration_secs, completed_at) = row?;
            let mode = mode
                .parse::<TimerMode>()
                .map_err(|e| DatabaseError::CorruptRecord(e.to_string()))?;
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map_err(|e| DatabaseError::CorruptRecord(e.to_string()))?
                .with_timezone(&Utc);
            records.push(SessionRecord {
                id,
                mode,
                duration_secs,
                completed_at,
            });
        }
        Ok(records)
    }

    pub fn stats_today(&self) -> Result<Stats, DatabaseError> {
        let mut stats = self.totals_since(Some(&today_start()))?;
        stats.today_sessions = stats.study_sessions;
        stats.today_study_secs = stats.study_secs;
        Ok(stats)
    }

    pub fn stats_all(&self) -> Result<Stats, DatabaseError> {
        let mut stats = self.totals_since(None)?;
        let today = self.totals_since(Some(&today_start()))?;
        stats.today_sessions = today.study_sessions;
        stats.today_study_secs = today.study_secs;
        Ok(stats)
    }

    fn totals_since(&self, since: Option<&str>) -> Result<Stats, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT mode, COUNT(*), COALESCE(SUM(duration_secs), 0)
             FROM sessions
             WHERE ?1 IS NULL OR completed_at >= ?1
             GROUP BY mode",
        )?;
        let rows = stmt.query_map(params![since], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
            ))
        })?;

        let mut stats = Stats::default();
        for row in rows {
            let (mode, count, secs) = row?;
            match mode.as_str() {
                "study" => {
                    stats.study_sessions += count;
                    stats.study_secs += secs;
                }
                "break" => {
                    stats.break_secs += secs;
                }
                _ => {}
            }
        }
        Ok(stats)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn today_start() -> String {
    format!("{}T00:00:00+00:00", Utc::now().format("%Y-%m-%d"))
}

/// Writes one session row per completed phase.
pub struct SessionRecorder<'a> {
    db: &'a Database,
    failures: usize,
}

impl<'a> SessionRecorder<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db, failures: 0 }
    }

    /// Number of completions that could not be written.
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl TimerObserver for SessionRecorder<'_> {
    fn on_event(&mut self, event: &Event) {
        if let Event::CycleCompleted {
            previous_mode,
            duration_secs,
            at,
            ..
        } = event
        {
            if let Err(e) = self.db.record_session(*previous_mode, *duration_secs, *at) {
                self.failures += 1;
                error!(error = %e, "failed to record session");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_query() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_session(TimerMode::Study, 1500, now).unwrap();
        db.record_session(TimerMode::Break, 300, now).unwrap();
        let stats = db.stats_all().unwrap();
        assert_eq!(stats.study_sessions, 1);
        assert_eq!(stats.study_secs, 1500);
        assert_eq!(stats.break_secs, 300);
        assert_eq!(stats.today_sessions, 1);
    }

    #[test]
    fn today_excludes_older_sessions() {
        let db = Database::open_memory().unwrap();
        let old = Utc::now() - chrono::Duration::days(2);
        db.record_session(TimerMode::Study, 1500, old).unwrap();
        db.record_session(TimerMode::Study, 600, Utc::now()).unwrap();

        let today = db.stats_today().unwrap();
        assert_eq!(today.study_sessions, 1);
        assert_eq!(today.study_secs, 600);

        let all = db.stats_all().unwrap();
        assert_eq!(all.study_sessions, 2);
        assert_eq!(all.today_study_secs, 600);
    }

    #[test]
    fn recent_sessions_newest_first() {
        let db = Database::open_memory().unwrap();
        let earlier = Utc::now() - chrono::Duration::minutes(30);
        db.record_session(TimerMode::Study, 1500, earlier).unwrap();
        db.record_session(TimerMode::Break, 300, Utc::now()).unwrap();
        let recent = db.recent_sessions(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].mode, TimerMode::Break);
        assert_eq!(recent[1].duration_secs, 1500);
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_delete("test").unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn recorder_ignores_everything_but_completions() {
        let db = Database::open_memory().unwrap();
        let mut recorder = SessionRecorder::new(&db);
        recorder.on_event(&Event::TimerReset { at: Utc::now() });
        recorder.on_event(&Event::CycleCompleted {
            previous_mode: TimerMode::Study,
            next_mode: TimerMode::Break,
            duration_secs: 1500,
            completed_sessions: 1,
            at: Utc::now(),
        });
        assert_eq!(recorder.failures(), 0);
        assert_eq!(db.stats_all().unwrap().study_sessions, 1);
    }
}
