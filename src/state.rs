use std::sync::Mutex;

use crate::db::CalloffDb;

/// Application state managed by Tauri.
///
/// The store handle is opened exactly once, at startup. If the open fails
/// (storage denied, unreadable profile directory), `db` stays `None` and
/// every command surfaces the failure instead of rendering without data.
pub struct AppState {
    pub db: Mutex<Option<CalloffDb>>,
}

impl AppState {
    pub fn new() -> Self {
        let db = match CalloffDb::open() {
            Ok(db) => Some(db),
            Err(e) => {
                log::warn!("Failed to open call-off database: {e}. Commands will report the failure.");
                None
            }
        };

        Self { db: Mutex::new(db) }
    }

    /// Build state around an already-opened store. Useful for testing with
    /// a store at an explicit path.
    pub fn with_store(db: CalloffDb) -> Self {
        Self {
            db: Mutex::new(Some(db)),
        }
    }

    /// Run `f` against the store, mapping lock poisoning and the
    /// store-unavailable case to command-level error strings.
    pub fn with_db<T>(
        &self,
        f: impl FnOnce(&CalloffDb) -> Result<T, String>,
    ) -> Result<T, String> {
        let guard = self.db.lock().map_err(|_| "Lock poisoned")?;
        let db = guard.as_ref().ok_or("Database not initialized")?;
        f(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_db_reports_uninitialized_store() {
        let state = AppState {
            db: Mutex::new(None),
        };
        let result: Result<(), String> = state.with_db(|_| Ok(()));
        assert_eq!(result.unwrap_err(), "Database not initialized");
    }

    #[test]
    fn test_with_db_runs_against_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = CalloffDb::open_at(dir.path().join("state.db")).expect("open");
        let state = AppState::with_store(db);

        let employees = state
            .with_db(|db| db.get_employees().map_err(|e| e.to_string()))
            .expect("query");
        assert!(employees.is_empty());
    }
}
