//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use robots_backend::Trace;
#[cfg(debug_assertions)]
use robots_backend::doc::ApiDoc;
use robots_backend::domain::RobotCatalogueService;
use robots_backend::domain::ports::RobotRepository;
use robots_backend::inbound::http::health::{HealthState, live, ready};
use robots_backend::inbound::http::not_found::not_found;
use robots_backend::inbound::http::robots;
use robots_backend::inbound::http::state::HttpState;
use robots_backend::inbound::http::validation::json_config;
use robots_backend::outbound::memory::InMemoryRobotRepository;
use robots_backend::outbound::persistence::DieselRobotRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Pick the robot repository: PostgreSQL when a pool is configured,
/// otherwise process memory.
fn build_repository(config: &ServerConfig) -> Arc<dyn RobotRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselRobotRepository::new(pool.clone())),
        None => {
            warn!("no database configured; robots are kept in memory and lost on exit");
            Arc::new(InMemoryRobotRepository::new())
        }
    }
}

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = RobotCatalogueService::new(build_repository(config))
        .with_uniqueness_scope(config.uniqueness);
    web::Data::new(HttpState::from_service(service))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api").configure(robots::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "robots backend listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests;
