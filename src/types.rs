use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dates are stored and exchanged as `YYYY-MM-DD` strings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a stored date string. Returns `None` for anything that is not a
/// valid `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// An employee on the roster.
///
/// `id` is assigned by the store on insert and absent until then. No
/// uniqueness is enforced on any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

/// Category of a recorded absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloffType {
    Sick,
    Personal,
    Vacation,
    Other,
}

impl CalloffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalloffType::Sick => "sick",
            CalloffType::Personal => "personal",
            CalloffType::Vacation => "vacation",
            CalloffType::Other => "other",
        }
    }
}

impl std::str::FromStr for CalloffType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sick" => Ok(CalloffType::Sick),
            "personal" => Ok(CalloffType::Personal),
            "vacation" => Ok(CalloffType::Vacation),
            "other" => Ok(CalloffType::Other),
            _ => Err(format!("Unknown call-off type: {}", s)),
        }
    }
}

/// Approval state of a call-off. Every record is created as `Pending`;
/// nothing in the app transitions it afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloffStatus {
    Pending,
    Approved,
    Denied,
}

impl CalloffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalloffStatus::Pending => "pending",
            CalloffStatus::Approved => "approved",
            CalloffStatus::Denied => "denied",
        }
    }
}

impl std::str::FromStr for CalloffStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CalloffStatus::Pending),
            "approved" => Ok(CalloffStatus::Approved),
            "denied" => Ok(CalloffStatus::Denied),
            _ => Err(format!("Unknown call-off status: {}", s)),
        }
    }
}

/// A recorded call-off event.
///
/// `employee_id` is not checked against the roster at write time; a call-off
/// may reference an employee that was never created or was deleted later.
/// Readers resolve the reference at query time and must tolerate a miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calloff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub employee_id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub calloff_type: CalloffType,
    pub reason: String,
    pub status: CalloffStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A call-off joined to its employee at read time.
///
/// `employee` is `None` when the referenced employee no longer exists
/// (or never did): the dangling-reference case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCalloff {
    #[serde(flatten)]
    pub calloff: Calloff,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

/// Form input for recording a new call-off.
///
/// Status is never client-supplied; creation always starts at `Pending`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalloffInput {
    pub employee_id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub calloff_type: CalloffType,
    pub reason: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewCalloffInput {
    /// Field-level validation, run before a `Calloff` record is built.
    ///
    /// Deliberately does NOT check that the employee exists: the store keeps
    /// no referential integrity between the two collections.
    pub fn validate(&self) -> Result<(), String> {
        if self.employee_id <= 0 {
            return Err("Select an employee".to_string());
        }
        if parse_date(&self.date).is_none() {
            return Err(format!("Invalid date: {}", self.date));
        }
        if self.reason.trim().is_empty() {
            return Err("Reason is required".to_string());
        }
        Ok(())
    }
}

/// Form input for adding an employee to the roster.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployeeInput {
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

impl NewEmployeeInput {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("Name", &self.name),
            ("Department", &self.department),
            ("Position", &self.position),
            ("Email", &self.email),
            ("Phone", &self.phone),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", label));
            }
        }
        Ok(())
    }
}

/// A stat-card entry: a category label with its count and share of the
/// month's total (0 when the month is empty).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHighlight {
    pub label: String,
    pub count: u32,
    pub percent: f64,
}

/// One bar of the daily distribution chart. `percent_of_peak` is the bar
/// height relative to the busiest day of the month, 0 when no day has events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    pub date: String,
    pub count: u32,
    pub percent_of_peak: f64,
}

/// Monthly report payload for the Reports view.
///
/// `by_type` and `by_department` each sum to `total`; call-offs whose
/// employee is missing are counted under the `"Unknown"` department.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// The selected month, `YYYY-MM`.
    pub month: String,
    pub total: u32,
    pub by_type: BTreeMap<String, u32>,
    pub by_department: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common_type: Option<CategoryHighlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_department: Option<CategoryHighlight>,
    /// One entry per calendar day of the month, zero-count days included.
    pub daily: Vec<DailyCount>,
}
