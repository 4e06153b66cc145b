//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every robot handler, the health probes, the request
//! and envelope bodies, and the domain error wrappers ([`ErrorSchema`],
//! [`ErrorCodeSchema`]) that keep domain types free of utoipa derives.
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::robots::{
    LookupEnvelope, RobotRequest, RobotResponse, RobotSummary, WriteEnvelope,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Robots backend API",
        description = "CRUD access to the robot catalogue with field validation, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::robots::list_robots,
        crate::inbound::http::robots::search_robots,
        crate::inbound::http::robots::get_robot,
        crate::inbound::http::robots::create_robot,
        crate::inbound::http::robots::update_robot,
        crate::inbound::http::robots::delete_robot,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RobotRequest,
        RobotResponse,
        RobotSummary,
        LookupEnvelope,
        WriteEnvelope,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "robots", description = "Robot catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
