use crate::auth::auth::AuthUser;
use crate::timeclock::TimeClock;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SubmitEditRequest {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub requested_date: NaiveDate,
    #[schema(example = "Forgot to punch lunch return")]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct DecideEditRequest {
    /// `approved` or `rejected`
    #[schema(example = "approved")]
    pub decision: String,
    #[schema(example = "Confirmed with the team lead")]
    pub comment: String,
}

/* =========================
Submit correction request
========================= */
#[utoipa::path(
    post,
    path = "/api/edit_requests",
    request_body(
        content = SubmitEditRequest,
        description = "Day to correct and why",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Request submitted as pending", body = crate::model::edit_request::EditRequest),
        (status = 400, description = "Missing reason"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "EditRequest"
)]
pub async fn submit(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
    payload: web::Json<SubmitEditRequest>,
) -> actix_web::Result<impl Responder> {
    let request = time_clock
        .submit_request(&auth.email, payload.requested_date, &payload.reason)
        .await?;

    Ok(HttpResponse::Created().json(request))
}

/* =========================
Caller's own requests
========================= */
#[utoipa::path(
    get,
    path = "/api/edit_requests/mine",
    responses(
        (status = 200, description = "Requests filed by the caller, newest first", body = [crate::model::edit_request::EditRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "EditRequest"
)]
pub async fn list_mine(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
) -> actix_web::Result<impl Responder> {
    let requests = time_clock.list_employee_requests(&auth.email).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Manager queue (same company)
========================= */
#[utoipa::path(
    get,
    path = "/api/edit_requests/manager",
    responses(
        (status = 200, description = "Company requests split into pending and processed", body = crate::timeclock::edit_request::ManagerRequests),
        (status = 401, description = "Caller is not a manager"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "EditRequest"
)]
pub async fn list_for_manager(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;

    let requests = time_clock.list_manager_requests(&auth.email).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Approve / reject (one shot)
========================= */
#[utoipa::path(
    put,
    path = "/api/edit_requests/{request_id}/decision",
    params(
        ("request_id" = u64, Path, description = "ID of the edit request to decide")
    ),
    request_body(
        content = DecideEditRequest,
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Request decided", body = crate::model::edit_request::EditRequest),
        (status = 400, description = "Invalid decision or missing comment"),
        (status = 401, description = "Caller is not a manager"),
        (status = 403, description = "Requester belongs to another company"),
        (status = 404, description = "Edit request not found"),
        (status = 409, description = "Request already processed", body = Object, example = json!({
            "error": "edit request 1 has already been processed"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "EditRequest"
)]
pub async fn decide(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
    path: web::Path<u64>,
    payload: web::Json<DecideEditRequest>,
) -> actix_web::Result<impl Responder> {
    auth.require_manager()?;

    let request_id = path.into_inner();
    let request = time_clock
        .decide(request_id, &auth.email, &payload.decision, &payload.comment)
        .await?;

    Ok(HttpResponse::Ok().json(request))
}
