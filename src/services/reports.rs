// Reports service — monthly aggregation over the joined call-off set.
// Pure and stateless: recomputed from scratch on every request, no caching,
// no I/O. Malformed records degrade to the "Unknown"/excluded cases instead
// of erroring.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::types::{
    parse_date, CategoryHighlight, DailyCount, EnrichedCalloff, MonthlyReport, DATE_FORMAT,
};

/// Department label used when a call-off's employee no longer exists.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// A selected reporting month, parsed from the `YYYY-MM` month-input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    first_day: NaiveDate,
}

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.first_day.month() == 12 {
            (self.first_day.year() + 1, 1)
        } else {
            (self.first_day.year(), self.first_day.month() + 1)
        };
        // The first of the following month always exists, as does its
        // predecessor; the fallbacks are unreachable.
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.first_day)
    }

    /// Inclusive on both endpoints.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }

    /// Every calendar day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day.iter_days().take_while(move |d| *d <= last)
    }

    /// The `YYYY-MM` form the month was selected as.
    pub fn label(&self) -> String {
        self.first_day.format("%Y-%m").to_string()
    }
}

impl std::str::FromStr for ReportMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month (expected YYYY-MM): {}", s);

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        ReportMonth::new(year, month).ok_or_else(invalid)
    }
}

/// Share of `denominator` as a percentage, 0 when the denominator is 0.
/// Never produces NaN.
pub fn percent(count: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(denominator) * 100.0
    }
}

/// Highest-count entry of a breakdown; ties break to the lexicographically
/// smallest label. `None` only when the breakdown is empty.
fn top_entry(counts: &BTreeMap<String, u32>, total: u32) -> Option<CategoryHighlight> {
    let mut best: Option<(&String, u32)> = None;
    for (label, &count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best.map(|(label, count)| CategoryHighlight {
        label: label.clone(),
        count,
        percent: percent(count, total),
    })
}

/// Aggregate one month of call-offs into the Reports view payload.
///
/// Input is the full joined set; everything outside the month is filtered
/// here. A call-off whose date string does not parse falls outside every
/// month. A call-off whose employee is missing counts under `"Unknown"`.
pub fn monthly_report(calloffs: &[EnrichedCalloff], month: &ReportMonth) -> MonthlyReport {
    let in_month: Vec<(&EnrichedCalloff, NaiveDate)> = calloffs
        .iter()
        .filter_map(|c| {
            let date = parse_date(&c.calloff.date)?;
            month.contains(date).then_some((c, date))
        })
        .collect();

    let total = in_month.len() as u32;

    let mut by_type: BTreeMap<String, u32> = BTreeMap::new();
    let mut by_department: BTreeMap<String, u32> = BTreeMap::new();
    for (c, _) in &in_month {
        *by_type
            .entry(c.calloff.calloff_type.as_str().to_string())
            .or_insert(0) += 1;

        let department = c
            .employee
            .as_ref()
            .map(|e| e.department.clone())
            .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string());
        *by_department.entry(department).or_insert(0) += 1;
    }

    // Daily histogram spans the whole month; days without events stay at 0.
    let mut day_counts: Vec<u32> = month.days().map(|_| 0).collect();
    for (_, date) in &in_month {
        if let Some(slot) = day_counts.get_mut(date.day0() as usize) {
            *slot += 1;
        }
    }
    let peak = day_counts.iter().copied().max().unwrap_or(0);
    let daily: Vec<DailyCount> = month
        .days()
        .zip(day_counts)
        .map(|(date, count)| DailyCount {
            date: date.format(DATE_FORMAT).to_string(),
            count,
            percent_of_peak: percent(count, peak),
        })
        .collect();

    MonthlyReport {
        month: month.label(),
        total,
        most_common_type: top_entry(&by_type, total),
        top_department: top_entry(&by_department, total),
        by_type,
        by_department,
        daily,
    }
}
