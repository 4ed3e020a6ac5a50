pub mod admin;
pub mod edit_request;
pub mod error;
pub mod time_log;

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::auth::jwt::issue_token;
    use crate::config::Config;
    use crate::model::time_log::TimeLog;
    use crate::routes::{self, RateLimiters};
    use crate::timeclock::testing::fixture;

    const SECRET: &str = "test-secret";

    fn test_config() -> Config {
        Config {
            database_url: "mysql://unused".into(),
            jwt_secret: SECRET.into(),
            server_addr: "127.0.0.1:0".into(),
            api_prefix: "/api".into(),
            provision_interval_secs: 86_400,
            rate_punch_per_min: 600,
            rate_protected_per_min: 6000,
            log_dir: "logs".into(),
        }
    }

    /// Full routing stack over the memory-backed fixture.
    macro_rules! test_app {
        ($fx:expr) => {{
            let config = test_config();
            let limiters = RateLimiters::from_config(&config).unwrap();
            test::init_service(
                App::new()
                    .app_data(Data::new(config))
                    .app_data(Data::new($fx.time_clock.clone()))
                    .configure(|cfg| routes::configure(cfg, "/api", &limiters)),
            )
            .await
        }};
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn bearer(email: &str, role: u8) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", issue_token(email, role, SECRET, 3600)))
    }

    const MANAGER: u8 = 2;
    const EMPLOYEE: u8 = 3;

    #[actix_web::test]
    async fn requests_without_a_token_are_rejected() {
        let fx = fixture().await;
        let app = test_app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/time_logs/punch")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/time_logs/punch")
            .peer_addr(peer())
            .insert_header(("Authorization", "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(fx.store.time_log_count().await, 0);
    }

    #[actix_web::test]
    async fn malformed_credentials_are_rejected() {
        let fx = fixture().await;
        let app = test_app!(fx);

        let cases = [
            (format!("Token {}", issue_token("ana@acme.com", EMPLOYEE, SECRET, 3600)), "Authorization header must start with Bearer"),
            (format!("Bearer {}", issue_token("ana@acme.com", 9, SECRET, 3600)), "Invalid role"),
            (format!("Bearer {}", issue_token("ana@acme.com", EMPLOYEE, "other-secret", 3600)), "Invalid or expired token"),
        ];
        for (header, error) in cases {
            let req = test::TestRequest::post()
                .uri("/api/time_logs/punch")
                .peer_addr(peer())
                .insert_header(("Authorization", header))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{error}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], error);
        }
        assert_eq!(fx.store.time_log_count().await, 0);
    }

    #[actix_web::test]
    async fn punch_day_over_http() {
        let fx = fixture().await;
        let app = test_app!(fx);

        for expected in ["awaiting_lunch_exit", "awaiting_lunch_return", "awaiting_exit", "complete"] {
            let req = test::TestRequest::post()
                .uri("/api/time_logs/punch")
                .peer_addr(peer())
                .insert_header(bearer("ana@acme.com", EMPLOYEE))
                .to_request();
            let log: TimeLog = test::call_and_read_body_json(&app, req).await;
            assert_eq!(log.state().to_string(), expected);
        }

        let req = test::TestRequest::post()
            .uri("/api/time_logs/punch")
            .peer_addr(peer())
            .insert_header(bearer("ana@acme.com", EMPLOYEE))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("already recorded"));

        let req = test::TestRequest::get()
            .uri("/api/time_logs")
            .peer_addr(peer())
            .insert_header(bearer("ana@acme.com", EMPLOYEE))
            .to_request();
        let logs: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0]["employee_email"], "ana@acme.com");
    }

    #[actix_web::test]
    async fn listing_another_company_is_forbidden() {
        let fx = fixture().await;
        let app = test_app!(fx);

        let req = test::TestRequest::get()
            .uri("/api/time_logs?employee_email=gil@globex.com")
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/time_logs?from=2026-02-01&to=2026-01-01")
            .peer_addr(peer())
            .insert_header(bearer("ana@acme.com", EMPLOYEE))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn manual_edit_over_http() {
        let fx = fixture().await;
        let log = fx.time_clock.punch("ana@acme.com").await.unwrap();
        let app = test_app!(fx);
        let uri = format!("/api/time_logs/{}/manual_edit", log.id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .peer_addr(peer())
            .insert_header(bearer("bruno@acme.com", EMPLOYEE))
            .set_json(json!({"entry_time": "2026-01-05T07:30", "reason": "fix"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&uri)
            .peer_addr(peer())
            .insert_header(bearer("otto@globex.com", MANAGER))
            .set_json(json!({"entry_time": "2026-01-05T07:30", "reason": "fix"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&uri)
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .set_json(json!({"entry_time": "07:30", "reason": "fix"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&uri)
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .set_json(json!({"entry_time": "2026-01-05T07:30", "reason": "late badge"}))
            .to_request();
        let edited: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(edited["entry_time"], "2026-01-05T07:30:00");
        assert_eq!(edited["edited_by_manager_name"], "maria");
        assert_eq!(edited["edit_reason"], "late badge");
    }

    #[actix_web::test]
    async fn edit_request_round_over_http() {
        let fx = fixture().await;
        let app = test_app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/edit_requests")
            .peer_addr(peer())
            .insert_header(bearer("ana@acme.com", EMPLOYEE))
            .set_json(json!({"requested_date": "2026-01-02", "reason": "missed exit"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["status"], "pending");
        let id = created["id"].as_u64().unwrap();

        let req = test::TestRequest::get()
            .uri("/api/edit_requests/manager")
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .to_request();
        let queue: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(queue["pending"][0]["id"], id);
        assert_eq!(queue["pending"][0]["employee_name"], "ana");

        let decision_uri = format!("/api/edit_requests/{id}/decision");
        let req = test::TestRequest::put()
            .uri(&decision_uri)
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .set_json(json!({"decision": "approved", "comment": "ok"}))
            .to_request();
        let decided: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(decided["status"], "approved");
        assert_eq!(decided["manager_email"], "maria@acme.com");

        let req = test::TestRequest::put()
            .uri(&decision_uri)
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .set_json(json!({"decision": "rejected", "comment": "again"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri("/api/edit_requests/mine")
            .peer_addr(peer())
            .insert_header(bearer("ana@acme.com", EMPLOYEE))
            .to_request();
        let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0]["status"], "approved");
    }

    #[actix_web::test]
    async fn admin_operations_need_admin_role() {
        let fx = fixture().await;
        let app = test_app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/admin/provision")
            .peer_addr(peer())
            .insert_header(bearer("maria@acme.com", MANAGER))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/admin/provision")
            .peer_addr(peer())
            .insert_header(bearer("root@acme.com", 1))
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report, json!({"created": 5, "existing": 0, "failed": 0}));

        let req = test::TestRequest::post()
            .uri("/api/admin/recompute")
            .peer_addr(peer())
            .insert_header(bearer("root@acme.com", 1))
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report, json!({"updated": 0, "failed": 0}));
    }
}
