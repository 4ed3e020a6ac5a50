//! Extra / missing hours of a completed day.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, warn};

/// Weekly workload assumed when an employee has none on file.
pub const DEFAULT_WEEKLY_WORKLOAD: f64 = 40.0;

/// Weekly workloads below this are treated as unset.
pub const MIN_WEEKLY_WORKLOAD: f64 = 0.1;

/// The weekly workload is spread over five working days.
pub const WORKING_DAYS_PER_WEEK: f64 = 5.0;

#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct HoursSummary {
    pub extra: f64,
    pub missing: f64,
    pub balance: f64,
}

pub fn effective_weekly_workload(weekly_workload: f64) -> f64 {
    if weekly_workload < MIN_WEEKLY_WORKLOAD {
        warn!(
            weekly_workload,
            default = DEFAULT_WEEKLY_WORKLOAD,
            "Workload not set or too small, using default weekly workload"
        );
        DEFAULT_WEEKLY_WORKLOAD
    } else {
        weekly_workload
    }
}

/// Judges a day against `weekly_workload / 5`.
///
/// Returns all zeros until every punch is recorded. Worked time is
/// `(exit - entry) - (lunch_return - lunch_exit)`; exactly one of
/// `extra` / `missing` can be non-zero and `balance = extra - missing`.
pub fn calculate(
    entry: Option<NaiveDateTime>,
    lunch_exit: Option<NaiveDateTime>,
    lunch_return: Option<NaiveDateTime>,
    exit: Option<NaiveDateTime>,
    weekly_workload: f64,
) -> HoursSummary {
    let (Some(entry), Some(lunch_exit), Some(lunch_return), Some(exit)) =
        (entry, lunch_exit, lunch_return, exit)
    else {
        return HoursSummary::default();
    };

    let daily_workload = effective_weekly_workload(weekly_workload) / WORKING_DAYS_PER_WEEK;

    let worked = (exit - entry) - (lunch_return - lunch_exit);
    let worked_hours = worked.num_seconds() as f64 / 3600.0;

    let (extra, missing) = if worked_hours > daily_workload {
        (worked_hours - daily_workload, 0.0)
    } else {
        (0.0, daily_workload - worked_hours)
    };

    let summary = HoursSummary {
        extra,
        missing,
        balance: extra - missing,
    };

    debug!(
        daily_workload,
        worked_hours,
        extra = summary.extra,
        missing = summary.missing,
        balance = summary.balance,
        "Calculated hours"
    );

    summary
}
