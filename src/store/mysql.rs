use std::str::FromStr;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;
use tracing::debug;

use super::{DateRange, IdentityStore, NewEditRequest, StoreError, StoreResult, TimeClockStore};
use crate::model::edit_request::{DecisionRecord, EditRequest, RequestStatus};
use crate::model::employee::Employee;
use crate::model::time_log::TimeLog;

const TIME_LOG_COLUMNS: &str = r#"
    id, employee_email, log_date,
    entry_time, lunch_exit_time, lunch_return_time, exit_time,
    extra_hours, missing_hours, balance,
    edited_by_manager_name, edited_at, edit_reason
"#;

const EDIT_REQUEST_COLUMNS: &str = r#"
    id, employee_email, requested_date, reason, status,
    manager_comment, manager_email, processed_at, created_at
"#;

const EMPLOYEE_COLUMNS: &str =
    "email, name, workload, company_id, is_manager, is_admin, active";

#[derive(sqlx::FromRow)]
struct EditRequestRow {
    id: u64,
    employee_email: String,
    requested_date: NaiveDate,
    reason: String,
    status: String,
    manager_comment: Option<String>,
    manager_email: Option<String>,
    processed_at: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
}

impl TryFrom<EditRequestRow> for EditRequest {
    type Error = StoreError;

    fn try_from(row: EditRequestRow) -> Result<Self, Self::Error> {
        let status = RequestStatus::from_str(&row.status).map_err(|_| {
            StoreError::Corrupt(format!(
                "edit request {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(EditRequest {
            id: row.id,
            employee_email: row.employee_email,
            requested_date: row.requested_date,
            reason: row.reason,
            status,
            manager_comment: row.manager_comment,
            manager_email: row.manager_email,
            processed_at: row.processed_at,
            created_at: row.created_at,
        })
    }
}

/// `?, ?, ?` for an `IN (...)` clause of `n` values.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for MySqlStore {
    async fn find_employee(&self, email: &str) -> StoreResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = ?");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn list_active_employees(&self) -> StoreResult<Vec<Employee>> {
        // employees of a deactivated company are skipped; a missing company row counts as active
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees \
             WHERE active = TRUE \
             AND NOT EXISTS (SELECT 1 FROM companies c WHERE c.id = employees.company_id AND c.active = FALSE)"
        );
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn list_company_employees(&self, company_id: &str) -> StoreResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE company_id = ?");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }
}

#[async_trait]
impl TimeClockStore for MySqlStore {
    async fn ensure_daily_log(
        &self,
        employee_email: &str,
        log_date: NaiveDate,
    ) -> StoreResult<bool> {
        // uq_time_logs_employee_day turns a duplicate into a no-op
        let result = sqlx::query(
            r#"
            INSERT IGNORE INTO time_logs (employee_email, log_date)
            VALUES (?, ?)
            "#,
        )
        .bind(employee_email)
        .bind(log_date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_daily_log(
        &self,
        employee_email: &str,
        log_date: NaiveDate,
    ) -> StoreResult<Option<TimeLog>> {
        let sql = format!(
            "SELECT {TIME_LOG_COLUMNS} FROM time_logs WHERE employee_email = ? AND log_date = ?"
        );
        let log = sqlx::query_as::<_, TimeLog>(&sql)
            .bind(employee_email)
            .bind(log_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    async fn find_time_log(&self, id: u64) -> StoreResult<Option<TimeLog>> {
        let sql = format!("SELECT {TIME_LOG_COLUMNS} FROM time_logs WHERE id = ?");
        let log = sqlx::query_as::<_, TimeLog>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(log)
    }

    async fn save_time_log(&self, log: &TimeLog) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE time_logs
            SET entry_time = ?,
                lunch_exit_time = ?,
                lunch_return_time = ?,
                exit_time = ?,
                extra_hours = ?,
                missing_hours = ?,
                balance = ?,
                edited_by_manager_name = ?,
                edited_at = ?,
                edit_reason = ?
            WHERE id = ?
            "#,
        )
        .bind(log.entry_time)
        .bind(log.lunch_exit_time)
        .bind(log.lunch_return_time)
        .bind(log.exit_time)
        .bind(log.extra_hours)
        .bind(log.missing_hours)
        .bind(log.balance)
        .bind(&log.edited_by_manager_name)
        .bind(log.edited_at)
        .bind(&log.edit_reason)
        .bind(log.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_time_logs(
        &self,
        employee_email: &str,
        range: Option<DateRange>,
    ) -> StoreResult<Vec<TimeLog>> {
        let mut sql = format!("SELECT {TIME_LOG_COLUMNS} FROM time_logs WHERE employee_email = ?");
        if range.is_some() {
            sql.push_str(" AND log_date BETWEEN ? AND ?");
        }
        sql.push_str(" ORDER BY log_date DESC");
        debug!(sql = %sql, employee_email, "Listing time logs");

        let mut query = sqlx::query_as::<_, TimeLog>(&sql).bind(employee_email);
        if let Some(range) = range {
            query = query.bind(range.from).bind(range.to);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn list_completed_logs(&self) -> StoreResult<Vec<TimeLog>> {
        let sql = format!(
            r#"
            SELECT {TIME_LOG_COLUMNS} FROM time_logs
            WHERE entry_time IS NOT NULL
            AND lunch_exit_time IS NOT NULL
            AND lunch_return_time IS NOT NULL
            AND exit_time IS NOT NULL
            "#
        );
        let logs = sqlx::query_as::<_, TimeLog>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(logs)
    }

    async fn insert_edit_request(&self, request: NewEditRequest) -> StoreResult<EditRequest> {
        let result = sqlx::query(
            r#"
            INSERT INTO edit_requests
                (employee_email, requested_date, reason, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.employee_email)
        .bind(request.requested_date)
        .bind(&request.reason)
        .bind(RequestStatus::Pending.as_ref())
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        self.find_edit_request(id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("edit request {id} vanished after insert")))
    }

    async fn find_edit_request(&self, id: u64) -> StoreResult<Option<EditRequest>> {
        let sql = format!("SELECT {EDIT_REQUEST_COLUMNS} FROM edit_requests WHERE id = ?");
        let row = sqlx::query_as::<_, EditRequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(EditRequest::try_from).transpose()
    }

    async fn record_decision(&self, id: u64, decision: &DecisionRecord) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE edit_requests
            SET status = ?,
                manager_comment = ?,
                manager_email = ?,
                processed_at = ?
            WHERE id = ?
            AND status = 'pending'
            "#,
        )
        .bind(decision.status.as_ref())
        .bind(&decision.manager_comment)
        .bind(&decision.manager_email)
        .bind(decision.processed_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_edit_requests(&self, employee_emails: &[String]) -> StoreResult<Vec<EditRequest>> {
        if employee_emails.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {EDIT_REQUEST_COLUMNS} FROM edit_requests WHERE employee_email IN ({}) ORDER BY created_at DESC, id DESC",
            placeholders(employee_emails.len())
        );

        let mut query = sqlx::query_as::<_, EditRequestRow>(&sql);
        for email in employee_emails {
            query = query.bind(email);
        }

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(EditRequest::try_from)
            .collect()
    }
}
