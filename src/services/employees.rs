// Employees service — roster CRUD behind the command layer.
// Validation happens here, before any record reaches the store.

use crate::db::CalloffDb;
use crate::types::{Employee, NewEmployeeInput};

/// Validate the form input and insert a new roster record.
/// Returns the assigned id.
pub fn create_employee(db: &CalloffDb, input: NewEmployeeInput) -> Result<i64, String> {
    input.validate()?;

    let employee = Employee {
        id: None,
        name: input.name,
        department: input.department,
        position: input.position,
        email: input.email,
        phone: input.phone,
    };
    db.add_employee(&employee).map_err(|e| e.to_string())
}

pub fn list_employees(db: &CalloffDb) -> Result<Vec<Employee>, String> {
    db.get_employees().map_err(|e| e.to_string())
}

pub fn get_employee(db: &CalloffDb, id: i64) -> Result<Option<Employee>, String> {
    db.get_employee(id).map_err(|e| e.to_string())
}

/// Full-record replace. The record must carry its id; unknown ids are
/// created as-is (the store's put semantics).
pub fn update_employee(db: &CalloffDb, employee: Employee) -> Result<(), String> {
    db.update_employee(&employee).map_err(|e| e.to_string())
}

/// Remove an employee from the roster.
///
/// Call-offs referencing the employee are NOT cascaded; they keep their
/// `employee_id` and show up as "Unknown" in reports from then on.
pub fn delete_employee(db: &CalloffDb, id: i64) -> Result<(), String> {
    db.delete_employee(id).map_err(|e| e.to_string())
}
