use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::{Value, json};
use tracing::debug;

/// Resolves the bearer token into an `AuthUser` extension, or answers 401.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    match authenticate(&req, &config.jwt_secret) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        Err(body) => {
            debug!(path = %req.path(), reason = %body["error"], "Rejected request");
            let resp = HttpResponse::Unauthorized().json(body);
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}

/// The 401 body on failure.
fn authenticate(req: &ServiceRequest, secret: &str) -> Result<AuthUser, Value> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| json!({"error": "Missing Authorization header"}))?
        .to_str()
        .map_err(|_| json!({"error": "Invalid Authorization header encoding"}))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| json!({"error": "Authorization header must start with Bearer"}))?;

    let claims = verify_token(token, secret)
        .map_err(|e| json!({"error": "Invalid or expired token", "details": e}))?;

    AuthUser::try_from(claims).map_err(|role| json!({"error": "Invalid role", "details": role}))
}
