pub mod commands;
pub mod db;
pub mod migrations;
pub mod services;
pub mod state;
pub mod types;

use std::sync::Arc;

use state::AppState;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Create shared state; opens (or creates) the local store
            let state = Arc::new(AppState::new());
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Employees
            commands::get_employees,
            commands::get_employee,
            commands::add_employee,
            commands::update_employee,
            commands::delete_employee,
            // Call-offs
            commands::get_calloffs,
            commands::get_calloff,
            commands::add_calloff,
            commands::update_calloff,
            commands::delete_calloff,
            commands::get_calloffs_for_employee,
            // Reports
            commands::get_monthly_report,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
