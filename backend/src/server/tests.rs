//! Tests for server construction and readiness signalling.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    ServerConfig::new(std::net::SocketAddr::from(([127, 0, 0, 1], 0)))
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
fn config_builder_keeps_bind_address(config: ServerConfig) {
    let config = config.with_uniqueness_scope(robots_backend::domain::UniquenessScope::AllRows);

    assert_eq!(config.bind_addr().port(), 0);
    assert!(config.db_pool.is_none());
}

#[rstest]
#[actix_rt::test]
async fn app_serves_robots_probes_and_fallback(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    health_state.mark_ready();
    let app = actix_test::init_service(build_app(health_state, build_http_state(&config))).await;

    for (uri, expected) in [
        ("/api/robots", StatusCode::OK),
        ("/health/ready", StatusCode::OK),
        ("/health/live", StatusCode::OK),
        ("/api/unknown", StatusCode::NOT_FOUND),
    ] {
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), expected, "unexpected status for {uri}");
    }
}
