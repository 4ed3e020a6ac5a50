use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod model;
mod models;
mod routes;
mod store;
mod timeclock;
mod utils;

use config::Config;
use db::init_db;
use routes::RateLimiters;
use store::mysql::MySqlStore;
use timeclock::TimeClock;
use timeclock::clock::LocalClock;
use timeclock::provisioner::DailyProvisioner;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "punch_clock.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;
    let store = Arc::new(MySqlStore::new(pool));
    let time_clock = TimeClock::new(store.clone(), store, Arc::new(LocalClock));

    let provisioner = DailyProvisioner::new(
        time_clock.clone(),
        Duration::from_secs(config.provision_interval_secs),
    )
    .start();

    let limiters = RateLimiters::from_config(&config)?;
    let server_addr = config.server_addr.clone();

    let result = HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(time_clock.clone()))
            // time clock routes behind auth + rate limiting
            .configure(|cfg| routes::configure(cfg, &config.api_prefix, &limiters))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await;

    provisioner.stop();
    info!("Server stopped");

    result.context("Server error")
}
