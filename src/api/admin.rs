use crate::auth::auth::AuthUser;
use crate::timeclock::TimeClock;
use actix_web::{HttpResponse, Responder, web};
use tracing::info;

/// Run today's provisioning now
#[utoipa::path(
    post,
    path = "/api/admin/provision",
    responses(
        (status = 200, description = "Provisioning finished", body = crate::timeclock::provisioner::ProvisionReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn provision(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    info!(admin = %auth.email, "Manual provisioning requested");

    let report = time_clock.provision_today().await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Re-derive hours of every completed log
#[utoipa::path(
    post,
    path = "/api/admin/recompute",
    responses(
        (status = 200, description = "Recompute finished", body = crate::timeclock::provisioner::RecomputeReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn recompute(
    auth: AuthUser,
    time_clock: web::Data<TimeClock>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    info!(admin = %auth.email, "Manual recompute requested");

    let report = time_clock.recompute_completed_logs().await?;
    Ok(HttpResponse::Ok().json(report))
}
