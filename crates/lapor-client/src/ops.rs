use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::error::{ClientError, ClientResult};
use crate::state::{map_sqlite_error, open_connection};

/// A slot is reclaimed after this many seconds, covering processes that died
/// without dropping their permit.
pub const STALE_AFTER_SECS: i64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Narrate,
    Scan,
    ExportPdf,
    ExportWord,
    ExportCloud,
}

impl ActionKind {
    pub fn slot(&self) -> &'static str {
        match self {
            ActionKind::Narrate => "narrate",
            ActionKind::Scan => "scan",
            ActionKind::ExportPdf => "export-pdf",
            ActionKind::ExportWord => "export-word",
            ActionKind::ExportCloud => "export-cloud",
        }
    }
}

/// Exclusive claim on one action slot, held on its own connection so the
/// owning command can keep mutating state through the store. The row is
/// deleted when the permit drops, covering every exit path.
#[derive(Debug)]
pub struct OpPermit {
    connection: Connection,
    slot: &'static str,
}

impl Drop for OpPermit {
    fn drop(&mut self) {
        let _ = self.connection.execute(
            "DELETE FROM internal_operation_slots WHERE slot = ?1",
            [self.slot],
        );
    }
}

pub fn acquire(db_path: &Path, kind: ActionKind) -> ClientResult<OpPermit> {
    let connection = open_connection(db_path)?;
    let now = unix_now();
    let slot = kind.slot();

    connection
        .execute(
            "DELETE FROM internal_operation_slots WHERE acquired_at < ?1",
            [now - STALE_AFTER_SECS],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let inserted = connection.execute(
        "INSERT INTO internal_operation_slots (slot, acquired_at) VALUES (?1, ?2)",
        (slot, now),
    );
    match inserted {
        Ok(_) => Ok(OpPermit { connection, slot }),
        Err(error) if is_constraint_violation(&error) => {
            Err(ClientError::operation_in_progress(slot))
        }
        Err(error) => Err(map_sqlite_error(db_path, &error)),
    }
}

fn is_constraint_violation(error: &SqliteError) -> bool {
    matches!(
        error.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    )
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    use std::path::PathBuf;

    fn test_db() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let mut conn = Connection::open(&path).unwrap();
        migrations::run_pending(&mut conn).unwrap();
        (dir, path)
    }

    fn slot_rows(path: &Path) -> i64 {
        let conn = Connection::open(path).unwrap();
        conn.query_row("SELECT COUNT(*) FROM internal_operation_slots", [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn second_acquire_of_same_slot_is_rejected() {
        let (_dir, path) = test_db();
        let _permit = acquire(&path, ActionKind::Narrate).unwrap();
        let error = acquire(&path, ActionKind::Narrate).unwrap_err();
        assert_eq!(error.code, "operation_in_progress");
    }

    #[test]
    fn different_slots_do_not_contend() {
        let (_dir, path) = test_db();
        let _narrate = acquire(&path, ActionKind::Narrate).unwrap();
        let _export = acquire(&path, ActionKind::ExportPdf).unwrap();
        assert_eq!(slot_rows(&path), 2);
    }

    #[test]
    fn dropping_the_permit_releases_the_slot() {
        let (_dir, path) = test_db();
        {
            let _permit = acquire(&path, ActionKind::Scan).unwrap();
            assert_eq!(slot_rows(&path), 1);
        }
        assert_eq!(slot_rows(&path), 0);
        let _again = acquire(&path, ActionKind::Scan).unwrap();
    }

    #[test]
    fn stale_slots_are_reclaimed() {
        let (_dir, path) = test_db();
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO internal_operation_slots (slot, acquired_at) VALUES ('narrate', ?1)",
            [unix_now() - STALE_AFTER_SECS - 5],
        )
        .unwrap();
        drop(conn);
        let _permit = acquire(&path, ActionKind::Narrate).unwrap();
    }
}
