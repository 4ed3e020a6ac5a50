use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::TimeClock;
use super::error::{TimeClockError, TimeClockResult, require};
use super::hours;
use crate::model::time_log::{PunchSlot, TimeLog};

/// Naive formats accepted for corrected punches, in local time.
/// RFC 3339 with an offset is accepted as well and converted to local time.
const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Punch values a manager wants to overwrite. Absent or empty fields are kept.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct PunchCorrection {
    #[schema(example = "2026-01-05T08:00")]
    pub entry_time: Option<String>,
    #[schema(example = "2026-01-05T12:00")]
    pub lunch_exit_time: Option<String>,
    #[schema(example = "2026-01-05T13:00")]
    pub lunch_return_time: Option<String>,
    #[schema(example = "2026-01-05T17:00:00")]
    pub exit_time: Option<String>,
}

impl PunchCorrection {
    fn supplied(&self) -> impl Iterator<Item = (PunchSlot, &'static str, &str)> {
        [
            (PunchSlot::Entry, "entry_time", &self.entry_time),
            (PunchSlot::LunchExit, "lunch_exit_time", &self.lunch_exit_time),
            (PunchSlot::LunchReturn, "lunch_return_time", &self.lunch_return_time),
            (PunchSlot::Exit, "exit_time", &self.exit_time),
        ]
        .into_iter()
        .filter_map(|(slot, field, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (slot, field, v))
        })
    }

    /// Parses every supplied value; the first bad one fails the whole set.
    fn parse(&self) -> TimeClockResult<Vec<(PunchSlot, NaiveDateTime)>> {
        self.supplied()
            .map(|(slot, field, value)| {
                parse_timestamp(value)
                    .map(|at| (slot, at))
                    .ok_or_else(|| TimeClockError::InvalidTimestamp {
                        field,
                        value: value.to_string(),
                    })
            })
            .collect()
    }
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
}

impl TimeClock {
    /// Overwrites punches of a subordinate's log and stamps who/when/why.
    ///
    /// Checks, in order: a reason is given, the actor is a manager, the log
    /// exists, its owner exists and shares the manager's company, and every
    /// supplied value parses. Nothing is written unless all pass.
    pub async fn manager_edit(
        &self,
        time_log_id: u64,
        manager_email: &str,
        correction: &PunchCorrection,
        reason: &str,
    ) -> TimeClockResult<TimeLog> {
        require(reason, "reason")?;

        let guard = self.tenant_guard();
        let manager = guard.resolve_manager(manager_email).await?;

        let target = self
            .store
            .find_time_log(time_log_id)
            .await?
            .ok_or(TimeClockError::TimeLogNotFound(time_log_id))?;

        let owner = guard.admit(&manager, &target.employee_email).await?;

        let changes = correction.parse()?;

        let _lock = self.locks.acquire(&target.employee_email, target.log_date).await;
        let mut log = self
            .store
            .find_time_log(time_log_id)
            .await?
            .ok_or(TimeClockError::TimeLogNotFound(time_log_id))?;

        for (slot, at) in &changes {
            log.set_slot(*slot, *at);
        }

        log.edited_by_manager_name = Some(manager.name.clone());
        log.edited_at = Some(self.clock.now());
        log.edit_reason = Some(reason.trim().to_string());

        if log.is_complete() {
            let summary = hours::calculate(
                log.entry_time,
                log.lunch_exit_time,
                log.lunch_return_time,
                log.exit_time,
                owner.workload,
            );
            log.extra_hours = summary.extra;
            log.missing_hours = summary.missing;
            log.balance = summary.balance;
        }

        self.store.save_time_log(&log).await?;

        info!(
            time_log_id,
            manager_email = %manager.email,
            employee_email = %log.employee_email,
            fields = changes.len(),
            reason = %reason,
            "Time log edited by manager"
        );

        Ok(log)
    }
}
