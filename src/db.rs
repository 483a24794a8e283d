//! SQLite-based local store for the employee roster and call-off records.
//!
//! The database lives at `~/.calloff-tracker/calloff-tracker.db` and is the
//! single source of truth for the app. Both collections use auto-assigned
//! integer primary keys; lookup fields carry non-unique secondary indexes
//! (see `migrations/001_baseline.sql`). There is no foreign key between
//! call-offs and employees: the join is computed at read time and a call-off
//! may reference an employee that no longer exists.

use std::path::PathBuf;

use rusqlite::{params, Connection, Row};
use thiserror::Error;

use crate::types::{Calloff, Employee};

/// Errors specific to store operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to create database directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Cannot update a {0} that has no id")]
    MissingId(&'static str),
}

/// SQLite connection wrapper for the employees and calloffs collections.
///
/// This is intentionally NOT `Clone` or `Sync`. It is held behind a
/// `std::sync::Mutex` in `AppState` so that Tauri sync commands can
/// access it safely.
pub struct CalloffDb {
    conn: Connection,
}

impl CalloffDb {
    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database at `~/.calloff-tracker/calloff-tracker.db`
    /// and bring the schema up to date.
    pub fn open() -> Result<Self, DbError> {
        let path = Self::db_path()?;
        Self::open_at(path)
    }

    /// Open a database at an explicit path. Useful for testing.
    pub fn open_at(path: PathBuf) -> Result<Self, DbError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(DbError::CreateDir)?;
            }
        }

        let conn = Connection::open(&path)?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        crate::migrations::run_migrations(&conn).map_err(DbError::Migration)?;

        Ok(Self { conn })
    }

    /// Resolve the default database path: `~/.calloff-tracker/calloff-tracker.db`.
    fn db_path() -> Result<PathBuf, DbError> {
        let home = dirs::home_dir().ok_or(DbError::HomeDirNotFound)?;
        Ok(home.join(".calloff-tracker").join("calloff-tracker.db"))
    }

    // =========================================================================
    // Employees
    // =========================================================================

    /// Insert a new employee and return the assigned id.
    ///
    /// Any id already present on the record is ignored; the store assigns
    /// the next one. No duplicate detection on any field.
    pub fn add_employee(&self, employee: &Employee) -> Result<i64, DbError> {
        self.conn.execute(
            "INSERT INTO employees (name, department, position, email, phone)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                employee.name,
                employee.department,
                employee.position,
                employee.email,
                employee.phone,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Every employee in the collection, in rowid order. Callers must not
    /// attach meaning to the ordering.
    pub fn get_employees(&self) -> Result<Vec<Employee>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, department, position, email, phone FROM employees",
        )?;
        let rows = stmt.query_map([], employee_from_row)?;

        let mut employees = Vec::new();
        for row in rows {
            employees.push(row?);
        }
        Ok(employees)
    }

    /// Get a single employee by id, or `None` if absent.
    pub fn get_employee(&self, id: i64) -> Result<Option<Employee>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, department, position, email, phone
             FROM employees
             WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], employee_from_row)?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Full-record replace at the record's id. An id that does not exist is
    /// created as-is (upsert), matching the store's put semantics.
    pub fn update_employee(&self, employee: &Employee) -> Result<(), DbError> {
        let id = employee.id.ok_or(DbError::MissingId("employee"))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO employees (id, name, department, position, email, phone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                employee.name,
                employee.department,
                employee.position,
                employee.email,
                employee.phone,
            ],
        )?;
        Ok(())
    }

    /// Delete an employee by id. Deleting an absent id is a no-op.
    ///
    /// Call-offs referencing the employee are left in place; readers resolve
    /// them to the "Unknown" case.
    pub fn delete_employee(&self, id: i64) -> Result<(), DbError> {
        self.conn
            .execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        Ok(())
    }

    // =========================================================================
    // Call-offs
    // =========================================================================

    /// Insert a new call-off and return the assigned id.
    ///
    /// `employee_id` is stored as given; the roster is not consulted.
    pub fn add_calloff(&self, calloff: &Calloff) -> Result<i64, DbError> {
        self.conn.execute(
            "INSERT INTO calloffs (employee_id, date, type, reason, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                calloff.employee_id,
                calloff.date,
                calloff.calloff_type.as_str(),
                calloff.reason,
                calloff.status.as_str(),
                calloff.notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Every call-off in the collection, in rowid order.
    pub fn get_calloffs(&self) -> Result<Vec<Calloff>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, employee_id, date, type, reason, status, notes FROM calloffs",
        )?;
        let rows = stmt.query_map([], calloff_from_row)?;

        let mut calloffs = Vec::new();
        for row in rows {
            calloffs.push(row?);
        }
        Ok(calloffs)
    }

    /// Get a single call-off by id, or `None` if absent.
    pub fn get_calloff(&self, id: i64) -> Result<Option<Calloff>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, employee_id, date, type, reason, status, notes
             FROM calloffs
             WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], calloff_from_row)?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Full-record replace at the record's id, with the same upsert
    /// semantics as `update_employee`.
    pub fn update_calloff(&self, calloff: &Calloff) -> Result<(), DbError> {
        let id = calloff.id.ok_or(DbError::MissingId("call-off"))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO calloffs (id, employee_id, date, type, reason, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                calloff.employee_id,
                calloff.date,
                calloff.calloff_type.as_str(),
                calloff.reason,
                calloff.status.as_str(),
                calloff.notes,
            ],
        )?;
        Ok(())
    }

    /// Delete a call-off by id. Deleting an absent id is a no-op.
    pub fn delete_calloff(&self, id: i64) -> Result<(), DbError> {
        self.conn
            .execute("DELETE FROM calloffs WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// All call-offs recorded against one employee id. Filters on the
    /// indexed `employee_id` column; an unknown id yields an empty vec.
    pub fn get_calloffs_by_employee(&self, employee_id: i64) -> Result<Vec<Calloff>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, employee_id, date, type, reason, status, notes
             FROM calloffs
             WHERE employee_id = ?1",
        )?;
        let rows = stmt.query_map(params![employee_id], calloff_from_row)?;

        let mut calloffs = Vec::new();
        for row in rows {
            calloffs.push(row?);
        }
        Ok(calloffs)
    }
}

fn employee_from_row(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        department: row.get(2)?,
        position: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
    })
}

fn calloff_from_row(row: &Row) -> rusqlite::Result<Calloff> {
    let type_str: String = row.get(3)?;
    let status_str: String = row.get(5)?;
    Ok(Calloff {
        id: Some(row.get(0)?),
        employee_id: row.get(1)?,
        date: row.get(2)?,
        calloff_type: type_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into())
        })?,
        reason: row.get(4)?,
        status: status_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, e.into())
        })?,
        notes: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CalloffStatus, CalloffType};

    fn test_db() -> (tempfile::TempDir, CalloffDb) {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = CalloffDb::open_at(dir.path().join("test.db")).expect("open db");
        (dir, db)
    }

    fn sample_employee(name: &str, department: &str) -> Employee {
        Employee {
            id: None,
            name: name.to_string(),
            department: department.to_string(),
            position: "Engineer".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    fn sample_calloff(employee_id: i64, date: &str) -> Calloff {
        Calloff {
            id: None,
            employee_id,
            date: date.to_string(),
            calloff_type: CalloffType::Sick,
            reason: "Flu".to_string(),
            status: CalloffStatus::Pending,
            notes: None,
        }
    }

    #[test]
    fn test_add_then_get_returns_input_plus_id() {
        let (_dir, db) = test_db();

        let employee = sample_employee("Alice", "Engineering");
        let id = db.add_employee(&employee).expect("add");
        assert!(id > 0);

        let fetched = db.get_employee(id).expect("get").expect("present");
        assert_eq!(
            fetched,
            Employee {
                id: Some(id),
                ..employee
            }
        );
    }

    #[test]
    fn test_get_absent_id_is_none() {
        let (_dir, db) = test_db();
        assert!(db.get_employee(42).expect("get").is_none());
        assert!(db.get_calloff(42).expect("get").is_none());
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let (_dir, db) = test_db();

        let a = db.add_employee(&sample_employee("Alice", "Eng")).unwrap();
        let b = db.add_employee(&sample_employee("Bob", "Sales")).unwrap();
        assert_ne!(a, b);

        // Deleting one record leaves the other's id untouched.
        db.delete_employee(a).unwrap();
        let bob = db.get_employee(b).unwrap().expect("bob survives");
        assert_eq!(bob.id, Some(b));
    }

    #[test]
    fn test_get_all_after_adds_and_deletes() {
        let (_dir, db) = test_db();

        let mut ids = Vec::new();
        for i in 0..5 {
            let id = db
                .add_calloff(&sample_calloff(i, "2024-03-01"))
                .expect("add");
            ids.push(id);
        }
        db.delete_calloff(ids[1]).expect("delete");
        db.delete_calloff(ids[3]).expect("delete");

        let remaining = db.get_calloffs().expect("get all");
        assert_eq!(remaining.len(), 3);

        let remaining_ids: Vec<i64> = remaining.iter().filter_map(|c| c.id).collect();
        assert_eq!(remaining_ids, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_update_replaces_full_record() {
        let (_dir, db) = test_db();

        let id = db.add_employee(&sample_employee("Alice", "Eng")).unwrap();
        let mut updated = sample_employee("Alice", "Platform");
        updated.id = Some(id);
        updated.position = "Staff Engineer".to_string();
        db.update_employee(&updated).expect("update");

        let fetched = db.get_employee(id).unwrap().expect("present");
        assert_eq!(fetched, updated);
    }

    #[test]
    fn test_update_unknown_id_creates_record() {
        let (_dir, db) = test_db();

        // Upsert semantics: updating an id that was never inserted creates it.
        let mut employee = sample_employee("Ghost", "Ops");
        employee.id = Some(777);
        db.update_employee(&employee).expect("upsert");

        let fetched = db.get_employee(777).unwrap().expect("created");
        assert_eq!(fetched.name, "Ghost");
    }

    #[test]
    fn test_update_without_id_is_rejected() {
        let (_dir, db) = test_db();
        let err = db.update_employee(&sample_employee("NoId", "Eng")).unwrap_err();
        assert!(matches!(err, DbError::MissingId("employee")));
    }

    #[test]
    fn test_delete_nonexistent_is_noop() {
        let (_dir, db) = test_db();
        db.delete_employee(9999).expect("no-op delete");
        db.delete_calloff(9999).expect("no-op delete");
    }

    #[test]
    fn test_get_calloffs_by_employee() {
        let (_dir, db) = test_db();

        db.add_calloff(&sample_calloff(1, "2024-03-01")).unwrap();
        db.add_calloff(&sample_calloff(2, "2024-03-02")).unwrap();
        db.add_calloff(&sample_calloff(1, "2024-03-03")).unwrap();

        let for_one = db.get_calloffs_by_employee(1).expect("query");
        assert_eq!(for_one.len(), 2);
        assert!(for_one.iter().all(|c| c.employee_id == 1));

        let for_absent = db.get_calloffs_by_employee(99).expect("query");
        assert!(for_absent.is_empty());
    }

    #[test]
    fn test_calloff_round_trips_through_storage() {
        let (_dir, db) = test_db();

        let mut calloff = sample_calloff(5, "2024-07-04");
        calloff.calloff_type = CalloffType::Vacation;
        calloff.notes = Some("Long weekend".to_string());

        let id = db.add_calloff(&calloff).expect("add");
        let fetched = db.get_calloff(id).unwrap().expect("present");
        assert_eq!(
            fetched,
            Calloff {
                id: Some(id),
                ..calloff
            }
        );
    }

    #[test]
    fn test_dangling_employee_reference_is_stored() {
        let (_dir, db) = test_db();

        // No employee with id 404 exists; the write still succeeds.
        let id = db.add_calloff(&sample_calloff(404, "2024-03-01")).unwrap();
        let fetched = db.get_calloff(id).unwrap().expect("present");
        assert_eq!(fetched.employee_id, 404);
    }

    #[test]
    fn test_secondary_index_backs_employee_query() {
        let (_dir, db) = test_db();

        let plan: String = db
            .conn_ref()
            .query_row(
                "EXPLAIN QUERY PLAN SELECT id FROM calloffs WHERE employee_id = 1",
                [],
                |row| row.get(3),
            )
            .expect("query plan");
        assert!(
            plan.contains("idx_calloffs_employee_id"),
            "employee lookup should use the secondary index, got: {}",
            plan
        );
    }
}
