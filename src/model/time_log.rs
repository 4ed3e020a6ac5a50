use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

/// One employee's punch record for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimeLog {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "john.doe@company.com")]
    pub employee_email: String,

    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub log_date: NaiveDate,

    #[schema(example = "2026-01-05T08:00:00", format = "date-time", value_type = Option<String>)]
    pub entry_time: Option<NaiveDateTime>,

    #[schema(example = "2026-01-05T12:00:00", format = "date-time", value_type = Option<String>)]
    pub lunch_exit_time: Option<NaiveDateTime>,

    #[schema(example = "2026-01-05T13:00:00", format = "date-time", value_type = Option<String>)]
    pub lunch_return_time: Option<NaiveDateTime>,

    #[schema(example = "2026-01-05T17:00:00", format = "date-time", value_type = Option<String>)]
    pub exit_time: Option<NaiveDateTime>,

    #[schema(example = 0.0)]
    pub extra_hours: f64,

    #[schema(example = 0.0)]
    pub missing_hours: f64,

    #[schema(example = 0.0)]
    pub balance: f64,

    #[schema(example = "Mary Manager", nullable = true)]
    pub edited_by_manager_name: Option<String>,

    #[schema(format = "date-time", value_type = Option<String>)]
    pub edited_at: Option<NaiveDateTime>,

    #[schema(example = "Forgot to punch lunch return", nullable = true)]
    pub edit_reason: Option<String>,
}

/// Where a day's log stands in the entry / lunch-out / lunch-in / exit cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, AsRefStr, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PunchState {
    AwaitingEntry,
    AwaitingLunchExit,
    AwaitingLunchReturn,
    AwaitingExit,
    Complete,
}

/// The four punch slots, in the order they must be filled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PunchSlot {
    Entry,
    LunchExit,
    LunchReturn,
    Exit,
}

impl PunchSlot {
    pub const ORDER: [PunchSlot; 4] = [
        PunchSlot::Entry,
        PunchSlot::LunchExit,
        PunchSlot::LunchReturn,
        PunchSlot::Exit,
    ];
}

impl TimeLog {
    /// Empty shell for `(employee_email, log_date)`; `id` is assigned by the store.
    #[cfg(test)]
    pub fn shell(employee_email: &str, log_date: NaiveDate) -> Self {
        Self {
            id: 0,
            employee_email: employee_email.to_string(),
            log_date,
            entry_time: None,
            lunch_exit_time: None,
            lunch_return_time: None,
            exit_time: None,
            extra_hours: 0.0,
            missing_hours: 0.0,
            balance: 0.0,
            edited_by_manager_name: None,
            edited_at: None,
            edit_reason: None,
        }
    }

    pub fn slot(&self, slot: PunchSlot) -> Option<NaiveDateTime> {
        match slot {
            PunchSlot::Entry => self.entry_time,
            PunchSlot::LunchExit => self.lunch_exit_time,
            PunchSlot::LunchReturn => self.lunch_return_time,
            PunchSlot::Exit => self.exit_time,
        }
    }

    pub fn set_slot(&mut self, slot: PunchSlot, at: NaiveDateTime) {
        match slot {
            PunchSlot::Entry => self.entry_time = Some(at),
            PunchSlot::LunchExit => self.lunch_exit_time = Some(at),
            PunchSlot::LunchReturn => self.lunch_return_time = Some(at),
            PunchSlot::Exit => self.exit_time = Some(at),
        }
    }

    /// First unset slot in punch order, `None` once all four are filled.
    pub fn next_slot(&self) -> Option<PunchSlot> {
        PunchSlot::ORDER
            .into_iter()
            .find(|slot| self.slot(*slot).is_none())
    }

    pub fn state(&self) -> PunchState {
        match self.next_slot() {
            Some(PunchSlot::Entry) => PunchState::AwaitingEntry,
            Some(PunchSlot::LunchExit) => PunchState::AwaitingLunchExit,
            Some(PunchSlot::LunchReturn) => PunchState::AwaitingLunchReturn,
            Some(PunchSlot::Exit) => PunchState::AwaitingExit,
            None => PunchState::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == PunchState::Complete
    }
}
