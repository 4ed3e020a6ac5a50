//! Error taxonomy of the time clock.
//!
//! Every variant belongs to exactly one [`ErrorKind`] so the transport layer
//! can pick a status without inspecting messages.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    Storage,
}

#[derive(Error, Debug)]
pub enum TimeClockError {
    // ---------------------------
    // Validation
    // ---------------------------
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid date/time format for {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("decision must be 'approved' or 'rejected', got '{0}'")]
    InvalidDecision(String),

    #[error("date range start {from} is after end {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    // ---------------------------
    // Not found
    // ---------------------------
    #[error("time log {0} not found")]
    TimeLogNotFound(u64),

    #[error("edit request {0} not found")]
    EditRequestNotFound(u64),

    #[error("employee {0} not found")]
    EmployeeNotFound(String),

    // ---------------------------
    // Authorization
    // ---------------------------
    #[error("manager {0} not found")]
    ManagerNotFound(String),

    #[error("manager {manager} cannot act on employee {employee} of another company")]
    CrossCompany { manager: String, employee: String },

    // ---------------------------
    // State conflicts
    // ---------------------------
    #[error("all punches for {employee} on {date} are already recorded")]
    AlreadyComplete { employee: String, date: NaiveDate },

    #[error("edit request {0} has already been processed")]
    AlreadyProcessed(u64),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl TimeClockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TimeClockError::MissingField(_)
            | TimeClockError::InvalidTimestamp { .. }
            | TimeClockError::InvalidDecision(_)
            | TimeClockError::InvalidDateRange { .. } => ErrorKind::Validation,
            TimeClockError::TimeLogNotFound(_)
            | TimeClockError::EditRequestNotFound(_)
            | TimeClockError::EmployeeNotFound(_) => ErrorKind::NotFound,
            TimeClockError::ManagerNotFound(_) => ErrorKind::Unauthorized,
            TimeClockError::CrossCompany { .. } => ErrorKind::Forbidden,
            TimeClockError::AlreadyComplete { .. } | TimeClockError::AlreadyProcessed(_) => {
                ErrorKind::Conflict
            }
            TimeClockError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type TimeClockResult<T> = Result<T, TimeClockError>;

/// Rejects empty or whitespace-only required text.
pub(crate) fn require(value: &str, field: &'static str) -> TimeClockResult<()> {
    if value.trim().is_empty() {
        return Err(TimeClockError::MissingField(field));
    }
    Ok(())
}
