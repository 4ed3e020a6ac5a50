use crate::{
    api::{admin, edit_request, time_log},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use anyhow::Context;
use std::sync::Arc;

type Limiter = Arc<Governor<PeerIpKeyExtractor, NoOpMiddleware>>;

/// Per-IP limiters, built once and shared by every worker.
#[derive(Clone)]
pub struct RateLimiters {
    punch: Limiter,
    protected: Limiter,
}

impl RateLimiters {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            punch: Arc::new(
                build_limiter(config.rate_punch_per_min).context("RATE_PUNCH_PER_MIN")?,
            ),
            protected: Arc::new(
                build_limiter(config.rate_protected_per_min).context("RATE_PROTECTED_PER_MIN")?,
            ),
        })
    }
}

fn build_limiter(requests_per_min: u32) -> anyhow::Result<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limit")?;
    Ok(Governor::new(&cfg))
}

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str, limiters: &RateLimiters) {
    cfg.service(
        web::scope(api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(limiters.protected.clone()) // rate limiting
            .service(
                web::scope("/time_logs")
                    // /time_logs/punch
                    .service(
                        web::resource("/punch")
                            .wrap(limiters.punch.clone())
                            .route(web::post().to(time_log::punch)),
                    )
                    // /time_logs
                    .service(web::resource("").route(web::get().to(time_log::list_time_logs)))
                    // /time_logs/{id}/manual_edit
                    .service(
                        web::resource("/{id}/manual_edit")
                            .route(web::put().to(time_log::manual_edit)),
                    ),
            )
            .service(
                web::scope("/edit_requests")
                    // /edit_requests
                    .service(web::resource("").route(web::post().to(edit_request::submit)))
                    // /edit_requests/mine
                    .service(web::resource("/mine").route(web::get().to(edit_request::list_mine)))
                    // /edit_requests/manager
                    .service(
                        web::resource("/manager")
                            .route(web::get().to(edit_request::list_for_manager)),
                    )
                    // /edit_requests/{id}/decision
                    .service(
                        web::resource("/{id}/decision").route(web::put().to(edit_request::decide)),
                    ),
            )
            .service(
                web::scope("/admin")
                    .service(web::resource("/provision").route(web::post().to(admin::provision)))
                    .service(web::resource("/recompute").route(web::post().to(admin::recompute))),
            ),
    );
}
