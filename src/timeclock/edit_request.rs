use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::TimeClock;
use super::error::{TimeClockError, TimeClockResult, require};
use crate::model::edit_request::{Decision, DecisionRecord, EditRequest};
use crate::store::NewEditRequest;

/// A request as shown to a manager, with the requester's display name.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: EditRequest,
    #[schema(example = "John Doe")]
    pub employee_name: String,
}

/// Requests of a manager's company, newest first in each group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ManagerRequests {
    pub pending: Vec<RequestView>,
    pub processed: Vec<RequestView>,
}

impl TimeClock {
    /// Files a correction request for `requested_date`. Starts as pending.
    pub async fn submit_request(
        &self,
        employee_email: &str,
        requested_date: NaiveDate,
        reason: &str,
    ) -> TimeClockResult<EditRequest> {
        require(employee_email, "employee_email")?;
        require(reason, "reason")?;

        let request = self
            .store
            .insert_edit_request(NewEditRequest {
                employee_email: employee_email.trim().to_string(),
                requested_date,
                reason: reason.trim().to_string(),
                created_at: self.clock.now(),
            })
            .await?;

        info!(
            edit_request_id = request.id,
            employee_email = %request.employee_email,
            requested_date = %requested_date,
            "Edit request submitted"
        );

        Ok(request)
    }

    /// Approves or rejects a pending request. A decided request never changes
    /// again, and deciding does not touch the day's time log.
    pub async fn decide(
        &self,
        request_id: u64,
        manager_email: &str,
        decision: &str,
        comment: &str,
    ) -> TimeClockResult<EditRequest> {
        let verdict = Decision::from_str(decision.trim())
            .map_err(|_| TimeClockError::InvalidDecision(decision.to_string()))?;
        require(comment, "comment")?;

        let guard = self.tenant_guard();
        let manager = guard.resolve_manager(manager_email).await?;

        let request = self
            .store
            .find_edit_request(request_id)
            .await?
            .ok_or(TimeClockError::EditRequestNotFound(request_id))?;

        if !request.status.is_pending() {
            warn!(edit_request_id = request_id, status = %request.status, "Edit request already processed");
            return Err(TimeClockError::AlreadyProcessed(request_id));
        }

        guard.admit(&manager, &request.employee_email).await?;

        let record = DecisionRecord {
            status: verdict.into(),
            manager_comment: comment.trim().to_string(),
            manager_email: manager.email.clone(),
            processed_at: self.clock.now(),
        };

        // a concurrent decision may have won since the read above
        if !self.store.record_decision(request_id, &record).await? {
            warn!(edit_request_id = request_id, "Edit request decided concurrently");
            return Err(TimeClockError::AlreadyProcessed(request_id));
        }

        info!(
            edit_request_id = request_id,
            manager_email = %manager.email,
            decision = %verdict,
            "Edit request decided"
        );

        Ok(EditRequest {
            status: record.status,
            manager_comment: Some(record.manager_comment),
            manager_email: Some(record.manager_email),
            processed_at: Some(record.processed_at),
            ..request
        })
    }

    pub async fn list_employee_requests(&self, employee_email: &str) -> TimeClockResult<Vec<EditRequest>> {
        require(employee_email, "employee_email")?;
        Ok(self
            .store
            .list_edit_requests(&[employee_email.trim().to_string()])
            .await?)
    }

    /// Every request filed by the manager's company, split by status.
    pub async fn list_manager_requests(&self, manager_email: &str) -> TimeClockResult<ManagerRequests> {
        let manager = self.tenant_guard().resolve_manager(manager_email).await?;

        let staff = self
            .identity
            .list_company_employees(&manager.company_id)
            .await?;
        if staff.is_empty() {
            return Ok(ManagerRequests::default());
        }

        let names: HashMap<String, String> = staff
            .into_iter()
            .map(|employee| (employee.email, employee.name))
            .collect();
        let emails: Vec<String> = names.keys().cloned().collect();

        let (pending, processed): (Vec<_>, Vec<_>) = self
            .store
            .list_edit_requests(&emails)
            .await?
            .into_iter()
            .map(|request| RequestView {
                employee_name: names
                    .get(&request.employee_email)
                    .cloned()
                    .unwrap_or_default(),
                request,
            })
            .partition(|view| view.request.status.is_pending());

        Ok(ManagerRequests { pending, processed })
    }
}
