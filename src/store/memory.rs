//! In-process store backing the workflow tests.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{DateRange, IdentityStore, NewEditRequest, StoreResult, TimeClockStore};
use crate::model::edit_request::{DecisionRecord, EditRequest, RequestStatus};
use crate::model::employee::Employee;
use crate::model::time_log::TimeLog;

#[derive(Default)]
struct Tables {
    employees: BTreeMap<String, Employee>,
    inactive_companies: BTreeSet<String>,
    time_logs: BTreeMap<u64, TimeLog>,
    edit_requests: BTreeMap<u64, EditRequest>,
    next_log_id: u64,
    next_request_id: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_employee(&self, employee: Employee) {
        self.tables
            .write()
            .await
            .employees
            .insert(employee.email.clone(), employee);
    }

    pub async fn deactivate_company(&self, company_id: &str) {
        self.tables
            .write()
            .await
            .inactive_companies
            .insert(company_id.to_string());
    }

    pub async fn set_workload(&self, email: &str, workload: f64) {
        if let Some(employee) = self.tables.write().await.employees.get_mut(email) {
            employee.workload = workload;
        }
    }

    /// Writes a log as-is, bypassing the workflows. Returns the assigned id.
    pub async fn put_time_log(&self, mut log: TimeLog) -> u64 {
        let mut tables = self.tables.write().await;
        tables.next_log_id += 1;
        log.id = tables.next_log_id;
        tables.time_logs.insert(log.id, log);
        tables.next_log_id
    }

    pub async fn time_log_count(&self) -> usize {
        self.tables.read().await.time_logs.len()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_employee(&self, email: &str) -> StoreResult<Option<Employee>> {
        Ok(self.tables.read().await.employees.get(email).cloned())
    }

    async fn list_active_employees(&self) -> StoreResult<Vec<Employee>> {
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .values()
            .filter(|e| e.active && !tables.inactive_companies.contains(&e.company_id))
            .cloned()
            .collect())
    }

    async fn list_company_employees(&self, company_id: &str) -> StoreResult<Vec<Employee>> {
        Ok(self
            .tables
            .read()
            .await
            .employees
            .values()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TimeClockStore for MemoryStore {
    async fn ensure_daily_log(
        &self,
        employee_email: &str,
        log_date: NaiveDate,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let exists = tables
            .time_logs
            .values()
            .any(|l| l.employee_email == employee_email && l.log_date == log_date);
        if exists {
            return Ok(false);
        }

        tables.next_log_id += 1;
        let mut log = TimeLog::shell(employee_email, log_date);
        log.id = tables.next_log_id;
        tables.time_logs.insert(log.id, log);
        Ok(true)
    }

    async fn find_daily_log(
        &self,
        employee_email: &str,
        log_date: NaiveDate,
    ) -> StoreResult<Option<TimeLog>> {
        Ok(self
            .tables
            .read()
            .await
            .time_logs
            .values()
            .find(|l| l.employee_email == employee_email && l.log_date == log_date)
            .cloned())
    }

    async fn find_time_log(&self, id: u64) -> StoreResult<Option<TimeLog>> {
        Ok(self.tables.read().await.time_logs.get(&id).cloned())
    }

    async fn save_time_log(&self, log: &TimeLog) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables.time_logs.get_mut(&log.id) {
            let (email, date) = (stored.employee_email.clone(), stored.log_date);
            *stored = log.clone();
            stored.employee_email = email;
            stored.log_date = date;
        }
        Ok(())
    }

    async fn list_time_logs(
        &self,
        employee_email: &str,
        range: Option<DateRange>,
    ) -> StoreResult<Vec<TimeLog>> {
        let mut logs: Vec<TimeLog> = self
            .tables
            .read()
            .await
            .time_logs
            .values()
            .filter(|l| l.employee_email == employee_email)
            .filter(|l| range.is_none_or(|r| r.contains(l.log_date)))
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));
        Ok(logs)
    }

    async fn list_completed_logs(&self) -> StoreResult<Vec<TimeLog>> {
        Ok(self
            .tables
            .read()
            .await
            .time_logs
            .values()
            .filter(|l| l.is_complete())
            .cloned()
            .collect())
    }

    async fn insert_edit_request(&self, request: NewEditRequest) -> StoreResult<EditRequest> {
        let mut tables = self.tables.write().await;
        tables.next_request_id += 1;
        let stored = EditRequest {
            id: tables.next_request_id,
            employee_email: request.employee_email,
            requested_date: request.requested_date,
            reason: request.reason,
            status: RequestStatus::Pending,
            manager_comment: None,
            manager_email: None,
            processed_at: None,
            created_at: request.created_at,
        };
        tables.edit_requests.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_edit_request(&self, id: u64) -> StoreResult<Option<EditRequest>> {
        Ok(self.tables.read().await.edit_requests.get(&id).cloned())
    }

    async fn record_decision(&self, id: u64, decision: &DecisionRecord) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.edit_requests.get_mut(&id) {
            Some(request) if request.status.is_pending() => {
                request.status = decision.status;
                request.manager_comment = Some(decision.manager_comment.clone());
                request.manager_email = Some(decision.manager_email.clone());
                request.processed_at = Some(decision.processed_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_edit_requests(&self, employee_emails: &[String]) -> StoreResult<Vec<EditRequest>> {
        let mut requests: Vec<EditRequest> = self
            .tables
            .read()
            .await
            .edit_requests
            .values()
            .filter(|r| employee_emails.contains(&r.employee_email))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(requests)
    }
}
