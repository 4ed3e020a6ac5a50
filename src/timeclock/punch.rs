use chrono::NaiveDate;
use tracing::{info, warn};

use super::TimeClock;
use super::error::{TimeClockError, TimeClockResult, require};
use super::hours;
use crate::model::time_log::TimeLog;
use crate::store::{DateRange, StoreError};

impl TimeClock {
    /// Records one punch for `employee_email` at the current instant.
    ///
    /// Fills the first unset slot of today's log (creating the log when the
    /// provisioner has not run yet). The punch that completes the log derives
    /// the day's hours from the employee's current workload.
    pub async fn punch(&self, employee_email: &str) -> TimeClockResult<TimeLog> {
        require(employee_email, "employee_email")?;

        let today = self.clock.today();
        let _guard = self.locks.acquire(employee_email, today).await;

        if self.store.ensure_daily_log(employee_email, today).await? {
            info!(employee_email, log_date = %today, "Created time log on first punch");
        }

        let mut log = self
            .store
            .find_daily_log(employee_email, today)
            .await?
            .ok_or_else(|| {
                StoreError::Corrupt(format!(
                    "time log for {employee_email} on {today} missing after provisioning"
                ))
            })?;

        let Some(slot) = log.next_slot() else {
            warn!(employee_email, log_date = %today, "All punches already recorded");
            return Err(TimeClockError::AlreadyComplete {
                employee: employee_email.to_string(),
                date: today,
            });
        };

        let now = self.clock.now();
        log.set_slot(slot, now);

        if log.is_complete() {
            self.derive_hours(&mut log).await?;
        }

        self.store.save_time_log(&log).await?;

        info!(
            time_log_id = log.id,
            employee_email,
            slot = %slot,
            at = %now,
            state = %log.state(),
            "Punch recorded"
        );

        Ok(log)
    }

    /// Recomputes derived hours of a completed log from its owner's workload.
    /// An unknown owner leaves the derived fields untouched.
    async fn derive_hours(&self, log: &mut TimeLog) -> TimeClockResult<()> {
        match self.identity.find_employee(&log.employee_email).await? {
            Some(employee) => {
                let summary = hours::calculate(
                    log.entry_time,
                    log.lunch_exit_time,
                    log.lunch_return_time,
                    log.exit_time,
                    employee.workload,
                );
                log.extra_hours = summary.extra;
                log.missing_hours = summary.missing;
                log.balance = summary.balance;
            }
            None => {
                warn!(
                    time_log_id = log.id,
                    employee_email = %log.employee_email,
                    "Employee not found, hours left unchanged"
                );
            }
        }
        Ok(())
    }

    /// Logs of `employee_email`, newest day first, optionally limited to
    /// `[from, to]`.
    ///
    /// `actor_email` may always read its own logs; reading someone else's
    /// requires a manager of the same company.
    pub async fn list_logs(
        &self,
        actor_email: &str,
        employee_email: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> TimeClockResult<Vec<TimeLog>> {
        require(employee_email, "employee_email")?;

        if !actor_email.eq_ignore_ascii_case(employee_email) {
            self.tenant_guard()
                .authorize(actor_email, employee_email)
                .await?;
        }

        let range = match (from, to) {
            (None, None) => None,
            (from, to) => {
                let range = DateRange {
                    from: from.unwrap_or(NaiveDate::MIN),
                    to: to.unwrap_or(NaiveDate::MAX),
                };
                if range.from > range.to {
                    return Err(TimeClockError::InvalidDateRange {
                        from: range.from,
                        to: range.to,
                    });
                }
                Some(range)
            }
        };

        Ok(self.store.list_time_logs(employee_email, range).await?)
    }
}
