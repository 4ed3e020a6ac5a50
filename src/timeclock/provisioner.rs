use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::TimeClock;
use super::error::TimeClockResult;
use super::hours::{self, DEFAULT_WEEKLY_WORKLOAD};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProvisionReport {
    /// Shells created by this run
    pub created: usize,
    /// Employees that already had a log for the day
    pub existing: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecomputeReport {
    pub updated: usize,
    pub failed: usize,
}

impl TimeClock {
    /// Makes sure every active employee has a log for today.
    ///
    /// Idempotent. A failure for one employee is logged and counted; the
    /// others are still provisioned.
    pub async fn provision_today(&self) -> TimeClockResult<ProvisionReport> {
        let today = self.clock.today();
        let employees = self.identity.list_active_employees().await?;
        let mut report = ProvisionReport::default();

        for employee in &employees {
            match self.store.ensure_daily_log(&employee.email, today).await {
                Ok(true) => report.created += 1,
                Ok(false) => report.existing += 1,
                Err(e) => {
                    error!(
                        error = %e,
                        employee_email = %employee.email,
                        log_date = %today,
                        "Failed to provision time log"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            log_date = %today,
            created = report.created,
            existing = report.existing,
            failed = report.failed,
            "Daily provisioning finished"
        );

        Ok(report)
    }

    /// Re-derives extra/missing/balance of every completed log from the
    /// owner's current workload (40h/week when the owner is gone).
    pub async fn recompute_completed_logs(&self) -> TimeClockResult<RecomputeReport> {
        let logs = self.store.list_completed_logs().await?;
        info!(count = logs.len(), "Recomputing hours of completed time logs");

        let mut report = RecomputeReport::default();

        for mut log in logs {
            let workload = match self.identity.find_employee(&log.employee_email).await {
                Ok(Some(employee)) => employee.workload,
                Ok(None) => {
                    warn!(
                        time_log_id = log.id,
                        employee_email = %log.employee_email,
                        "Employee not found, using default weekly workload"
                    );
                    DEFAULT_WEEKLY_WORKLOAD
                }
                Err(e) => {
                    error!(error = %e, time_log_id = log.id, "Failed to load employee");
                    report.failed += 1;
                    continue;
                }
            };

            let _guard = self.locks.acquire(&log.employee_email, log.log_date).await;

            // the day may have been edited since it was listed
            match self.store.find_time_log(log.id).await {
                Ok(Some(current)) => log = current,
                Ok(None) => continue,
                Err(e) => {
                    error!(error = %e, time_log_id = log.id, "Failed to reload time log");
                    report.failed += 1;
                    continue;
                }
            }

            let summary = hours::calculate(
                log.entry_time,
                log.lunch_exit_time,
                log.lunch_return_time,
                log.exit_time,
                workload,
            );
            log.extra_hours = summary.extra;
            log.missing_hours = summary.missing;
            log.balance = summary.balance;

            match self.store.save_time_log(&log).await {
                Ok(()) => report.updated += 1,
                Err(e) => {
                    error!(error = %e, time_log_id = log.id, "Failed to update time log");
                    report.failed += 1;
                }
            }
        }

        info!(
            updated = report.updated,
            failed = report.failed,
            "Finished recomputing hours"
        );

        Ok(report)
    }
}

/// Background task provisioning the day's logs: once right away (followed by
/// a recompute of completed logs), then every `period`.
pub struct DailyProvisioner {
    time_clock: TimeClock,
    period: Duration,
}

pub struct ProvisionerHandle {
    task: JoinHandle<()>,
}

impl DailyProvisioner {
    pub fn new(time_clock: TimeClock, period: Duration) -> Self {
        Self { time_clock, period }
    }

    /// Spawns the loop on the current actix runtime.
    pub fn start(self) -> ProvisionerHandle {
        let task = actix_web::rt::spawn(async move {
            info!(period_secs = self.period.as_secs(), "Starting daily provisioner");

            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // the first tick completes immediately
            ticker.tick().await;
            self.run_once().await;
            if let Err(e) = self.time_clock.recompute_completed_logs().await {
                error!(error = %e, "Startup recompute failed");
            }

            loop {
                ticker.tick().await;
                self.run_once().await;
            }
        });

        ProvisionerHandle { task }
    }

    async fn run_once(&self) {
        if let Err(e) = self.time_clock.provision_today().await {
            error!(error = %e, "Daily provisioning failed");
        }
    }
}

impl ProvisionerHandle {
    pub fn stop(self) {
        self.task.abort();
        info!("Daily provisioner stopped");
    }
}
