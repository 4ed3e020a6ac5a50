use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, AsRefStr, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        *self == RequestStatus::Pending
    }
}

/// Manager verdict on a pending request. Only these two values are accepted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => RequestStatus::Approved,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// An employee's ask to have a day's punches corrected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "employee_email": "john.doe@company.com",
    "requested_date": "2026-01-05",
    "reason": "Forgot to punch lunch return",
    "status": "pending",
    "manager_comment": null,
    "manager_email": null,
    "processed_at": null,
    "created_at": "2026-01-06T09:00:00"
}))]
pub struct EditRequest {
    pub id: u64,
    pub employee_email: String,
    #[schema(format = "date", value_type = String)]
    pub requested_date: NaiveDate,
    pub reason: String,
    pub status: RequestStatus,
    pub manager_comment: Option<String>,
    pub manager_email: Option<String>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub processed_at: Option<NaiveDateTime>,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: NaiveDateTime,
}

/// Fields written when a pending request is decided.
#[derive(Debug, Clone)]
pub struct DecisionRecord {
    pub status: RequestStatus,
    pub manager_comment: String,
    pub manager_email: String,
    pub processed_at: NaiveDateTime,
}
