//! Storage seams of the time clock.
//!
//! `IdentityStore` is the read-only view of the employee directory;
//! `TimeClockStore` owns time logs and edit requests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::model::edit_request::{DecisionRecord, EditRequest};
use crate::model::employee::Employee;
use crate::model::time_log::TimeLog;

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Inclusive day range used to narrow log listings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    #[cfg(test)]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

#[derive(Debug, Clone)]
pub struct NewEditRequest {
    pub employee_email: String,
    pub requested_date: NaiveDate,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_employee(&self, email: &str) -> StoreResult<Option<Employee>>;

    /// Active employees whose company is not deactivated.
    async fn list_active_employees(&self) -> StoreResult<Vec<Employee>>;

    /// Every employee (active or not) of `company_id`.
    async fn list_company_employees(&self, company_id: &str) -> StoreResult<Vec<Employee>>;
}

#[async_trait]
pub trait TimeClockStore: Send + Sync {
    /// Atomic find-or-create of the `(employee_email, log_date)` shell.
    /// Returns `true` when a row was created, `false` when one already existed;
    /// an existing row is never modified.
    async fn ensure_daily_log(&self, employee_email: &str, log_date: NaiveDate)
    -> StoreResult<bool>;

    async fn find_daily_log(
        &self,
        employee_email: &str,
        log_date: NaiveDate,
    ) -> StoreResult<Option<TimeLog>>;

    async fn find_time_log(&self, id: u64) -> StoreResult<Option<TimeLog>>;

    /// Writes the punch, derived and provenance columns of an existing log.
    /// `employee_email` and `log_date` are never rewritten.
    async fn save_time_log(&self, log: &TimeLog) -> StoreResult<()>;

    /// Logs of one employee, newest day first.
    async fn list_time_logs(
        &self,
        employee_email: &str,
        range: Option<DateRange>,
    ) -> StoreResult<Vec<TimeLog>>;

    /// Logs whose four punches are all recorded.
    async fn list_completed_logs(&self) -> StoreResult<Vec<TimeLog>>;

    async fn insert_edit_request(&self, request: NewEditRequest) -> StoreResult<EditRequest>;

    async fn find_edit_request(&self, id: u64) -> StoreResult<Option<EditRequest>>;

    /// Applies `decision` only while the request is still pending.
    /// Returns `false` when it had already left `pending`.
    async fn record_decision(&self, id: u64, decision: &DecisionRecord) -> StoreResult<bool>;

    /// Requests filed by any of `employee_emails`, newest first.
    async fn list_edit_requests(&self, employee_emails: &[String]) -> StoreResult<Vec<EditRequest>>;
}
