// Call-offs service — record creation from form input plus the read-time
// join against the roster that the dashboard renders.

use std::collections::HashMap;

use crate::db::CalloffDb;
use crate::types::{Calloff, CalloffStatus, Employee, EnrichedCalloff, NewCalloffInput};

/// Validate the form input and record a new call-off.
///
/// Status always starts at `Pending`; the form cannot set it. The employee
/// id is stored as given, without an existence check: the store keeps no
/// referential integrity between the collections.
pub fn create_calloff(db: &CalloffDb, input: NewCalloffInput) -> Result<i64, String> {
    input.validate()?;

    let calloff = Calloff {
        id: None,
        employee_id: input.employee_id,
        date: input.date,
        calloff_type: input.calloff_type,
        reason: input.reason,
        status: CalloffStatus::Pending,
        notes: input.notes.filter(|n| !n.trim().is_empty()),
    };
    db.add_calloff(&calloff).map_err(|e| e.to_string())
}

/// Every call-off joined to its employee. A call-off whose employee is gone
/// keeps `employee: None` rather than being dropped.
pub fn list_enriched(db: &CalloffDb) -> Result<Vec<EnrichedCalloff>, String> {
    let calloffs = db.get_calloffs().map_err(|e| e.to_string())?;
    let employees = db.get_employees().map_err(|e| e.to_string())?;
    Ok(enrich(calloffs, &employees))
}

/// Join call-offs to employees by id.
///
/// Pure; shared by the dashboard listing and the reports pipeline.
pub fn enrich(calloffs: Vec<Calloff>, employees: &[Employee]) -> Vec<EnrichedCalloff> {
    let by_id: HashMap<i64, &Employee> = employees
        .iter()
        .filter_map(|e| e.id.map(|id| (id, e)))
        .collect();

    calloffs
        .into_iter()
        .map(|calloff| {
            let employee = by_id.get(&calloff.employee_id).map(|e| (*e).clone());
            EnrichedCalloff { calloff, employee }
        })
        .collect()
}

pub fn list_for_employee(db: &CalloffDb, employee_id: i64) -> Result<Vec<Calloff>, String> {
    db.get_calloffs_by_employee(employee_id)
        .map_err(|e| e.to_string())
}

pub fn get_calloff(db: &CalloffDb, id: i64) -> Result<Option<Calloff>, String> {
    db.get_calloff(id).map_err(|e| e.to_string())
}

/// Full-record replace; unknown ids are created as-is.
pub fn update_calloff(db: &CalloffDb, calloff: Calloff) -> Result<(), String> {
    db.update_calloff(&calloff).map_err(|e| e.to_string())
}

pub fn delete_calloff(db: &CalloffDb, id: i64) -> Result<(), String> {
    db.delete_calloff(id).map_err(|e| e.to_string())
}
