//! Tauri command surface: the boundary the webview frontend calls.
//!
//! One command per view operation: the dashboard lists enriched call-offs,
//! the employees view manages the roster, the new-call-off form submits a
//! validated input, and the reports view requests a monthly aggregate.
//! Commands stay thin; business logic lives in `services`.

use std::sync::Arc;

use tauri::State;

use crate::services::{calloffs, employees, reports};
use crate::state::AppState;
use crate::types::{
    Calloff, Employee, EnrichedCalloff, MonthlyReport, NewCalloffInput, NewEmployeeInput,
};

// =============================================================================
// Employees (/employees)
// =============================================================================

#[tauri::command]
pub fn get_employees(state: State<Arc<AppState>>) -> Result<Vec<Employee>, String> {
    state.with_db(employees::list_employees)
}

#[tauri::command]
pub fn get_employee(state: State<Arc<AppState>>, id: i64) -> Result<Option<Employee>, String> {
    state.with_db(|db| employees::get_employee(db, id))
}

#[tauri::command]
pub fn add_employee(state: State<Arc<AppState>>, input: NewEmployeeInput) -> Result<i64, String> {
    state.with_db(|db| employees::create_employee(db, input))
}

#[tauri::command]
pub fn update_employee(state: State<Arc<AppState>>, employee: Employee) -> Result<(), String> {
    state.with_db(|db| employees::update_employee(db, employee))
}

#[tauri::command]
pub fn delete_employee(state: State<Arc<AppState>>, id: i64) -> Result<(), String> {
    state.with_db(|db| employees::delete_employee(db, id))
}

// =============================================================================
// Call-offs (/ dashboard, /new-calloff form)
// =============================================================================

#[tauri::command]
pub fn get_calloffs(state: State<Arc<AppState>>) -> Result<Vec<EnrichedCalloff>, String> {
    state.with_db(calloffs::list_enriched)
}

#[tauri::command]
pub fn get_calloff(state: State<Arc<AppState>>, id: i64) -> Result<Option<Calloff>, String> {
    state.with_db(|db| calloffs::get_calloff(db, id))
}

#[tauri::command]
pub fn add_calloff(state: State<Arc<AppState>>, input: NewCalloffInput) -> Result<i64, String> {
    state.with_db(|db| calloffs::create_calloff(db, input))
}

#[tauri::command]
pub fn update_calloff(state: State<Arc<AppState>>, calloff: Calloff) -> Result<(), String> {
    state.with_db(|db| calloffs::update_calloff(db, calloff))
}

#[tauri::command]
pub fn delete_calloff(state: State<Arc<AppState>>, id: i64) -> Result<(), String> {
    state.with_db(|db| calloffs::delete_calloff(db, id))
}

#[tauri::command]
pub fn get_calloffs_for_employee(
    state: State<Arc<AppState>>,
    employee_id: i64,
) -> Result<Vec<Calloff>, String> {
    state.with_db(|db| calloffs::list_for_employee(db, employee_id))
}

// =============================================================================
// Reports (/reports)
// =============================================================================

/// Build the monthly report for a `YYYY-MM` month selection.
///
/// The month string is validated here; the aggregation itself cannot fail.
#[tauri::command]
pub fn get_monthly_report(
    state: State<Arc<AppState>>,
    month: String,
) -> Result<MonthlyReport, String> {
    let month: reports::ReportMonth = month.parse()?;

    state.with_db(|db| {
        let enriched = calloffs::list_enriched(db)?;
        Ok(reports::monthly_report(&enriched, &month))
    })
}
