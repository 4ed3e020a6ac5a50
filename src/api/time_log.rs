use crate::auth::auth::AuthUser;
use crate::timeclock::TimeClock;
use crate::timeclock::manager_edit::PunchCorrection;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct TimeLogQuery {
    /// Whose logs to list; defaults to the caller
    #[param(example = "john.doe@company.com")]
    pub employee_email: Option<String>,
    /// First day included
    #[param(value_type = Option<String>, example = "2026-01-01")]
    pub from: Option<NaiveDate>,
    /// Last day included
    #[param(value_type = Option<String>, example = "2026-01-31")]
    pub to: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct ManualEdit {
    #[serde(flatten)]
    pub punches: PunchCorrection,
    #[schema(example = "Badge reader was offline")]
    pub reason: String,
}

/// Punch endpoint
#[utoipa::path(
    post,
    path = "/api/time_logs/punch",
    responses(
        (status = 200, description = "Punch recorded in the next free slot of today's log", body = crate::model::time_log::TimeLog),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "All four punches of today are already recorded", body = Object, example = json!({
            "error": "all punches for john.doe@company.com on 2026-01-05 are already recorded"
        })),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "TimeLog"
)]
pub async fn punch(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
) -> actix_web::Result<impl Responder> {
    let log = time_clock.punch(&auth.email).await?;
    Ok(HttpResponse::Ok().json(log))
}

/// List time logs, newest day first
#[utoipa::path(
    get,
    path = "/api/time_logs",
    params(TimeLogQuery),
    responses(
        (status = 200, description = "Time logs", body = [crate::model::time_log::TimeLog]),
        (status = 400, description = "Invalid date range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Employee belongs to another company")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "TimeLog"
)]
pub async fn list_time_logs(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
    query: web::Query<TimeLogQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();
    let employee_email = query.employee_email.unwrap_or_else(|| auth.email.clone());

    let logs = time_clock
        .list_logs(&auth.email, &employee_email, query.from, query.to)
        .await?;

    Ok(HttpResponse::Ok().json(logs))
}

/// Manager correction of a subordinate's punches
#[utoipa::path(
    put,
    path = "/api/time_logs/{time_log_id}/manual_edit",
    params(
        ("time_log_id" = u64, Path, description = "ID of the time log to correct")
    ),
    request_body(
        content = ManualEdit,
        description = "Punches to overwrite; omitted fields are kept",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Time log corrected", body = crate::model::time_log::TimeLog),
        (status = 400, description = "Missing reason or malformed timestamp"),
        (status = 401, description = "Caller is not a manager"),
        (status = 403, description = "Employee belongs to another company"),
        (status = 404, description = "Time log not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "TimeLog"
)]
pub async fn manual_edit(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
    path: web::Path<u64>,
    payload: web::Json<ManualEdit>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;

    let time_log_id = path.into_inner();
    let log = time_clock
        .manager_edit(time_log_id, &auth.email, &payload.punches, &payload.reason)
        .await?;

    Ok(HttpResponse::Ok().json(log))
}
