use std::path::{Path, PathBuf};

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

use crate::error::{ClientError, ClientResult};
use crate::migrations;
use crate::model::AppState;
use crate::state::{
    ensure_state_directory, map_sqlite_error, open_connection, resolve_state_home, state_db_path,
};

/// Versioned key the whole state document lives under. Bump only with a
/// migration that rewrites the stored document.
pub const STATE_KEY: &str = "lapor_state_v1";

pub struct StateStore {
    db_path: PathBuf,
    connection: Connection,
}

impl StateStore {
    pub fn open(home_override: Option<&Path>) -> ClientResult<Self> {
        let home = resolve_state_home(home_override)?;
        ensure_state_directory(&home)?;
        let db_path = state_db_path(&home);
        let mut connection = open_connection(&db_path)?;
        migrations::run_pending(&mut connection)
            .map_err(|error| ClientError::migration_failed(&db_path, &error.to_string()))?;
        Ok(Self {
            db_path,
            connection,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Loads the state document. A missing slot or one that no longer parses
    /// yields a fresh default state rather than an error, so a damaged slot
    /// never locks the user out of their reports.
    pub fn load(&self) -> ClientResult<AppState> {
        let stored: Option<String> = self
            .connection
            .query_row(
                "SELECT value FROM internal_app_state WHERE key = ?1",
                [STATE_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;

        let state = match stored {
            Some(text) => serde_json::from_str(&text).unwrap_or_else(|_| default_state()),
            None => default_state(),
        };
        Ok(state)
    }

    pub fn save(&mut self, state: &AppState) -> ClientResult<()> {
        let serialized = serde_json::to_string(state)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tx.execute(
            "INSERT INTO internal_app_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (STATE_KEY, &serialized, Local::now().to_rfc3339()),
        )
        .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        tx.commit()
            .map_err(|error| map_sqlite_error(&self.db_path, &error))?;
        Ok(())
    }
}

/// Today's local date in the ISO form the rest of the system uses.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn default_state() -> AppState {
    let mut state = AppState::default();
    state.config.report_date = today();
    state
}
