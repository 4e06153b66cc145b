//! Robot catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/robots
//! GET    /api/robots/search/{name}
//! GET    /api/robots/{id}
//! POST   /api/robots
//! PUT    /api/robots/{id}
//! DELETE /api/robots/{id}
//! ```
//!
//! Reads answer with bare arrays or a `FOUND`/`NOT-FOUND` envelope. Writes
//! answer with an `OK` envelope, or `ERROR` plus every failed rule's message
//! when validation rejects the robot.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::RobotWriteError;
use crate::domain::{Error, Robot, RobotDraft, RobotId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::not_found::not_found_response;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;

/// Request payload for creating or replacing a robot.
///
/// Fields are optional here so that a missing field is reported by name
/// rather than as a generic decoding failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RobotRequest {
    #[schema(example = "Marta")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "mechanical")]
    pub robot_type: Option<String>,
    #[schema(example = 1981)]
    pub year: Option<i32>,
}

impl RobotRequest {
    fn into_draft(self) -> Result<RobotDraft, Error> {
        let name = self.name.ok_or_else(|| missing_field_error("name"))?;
        let robot_type = self.robot_type.ok_or_else(|| missing_field_error("type"))?;
        let year = self.year.ok_or_else(|| missing_field_error("year"))?;
        Ok(RobotDraft::new(name, robot_type, year))
    }
}

/// A stored robot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RobotResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Marta")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "mechanical")]
    pub robot_type: String,
    #[schema(example = 1981)]
    pub year: i32,
}

impl From<Robot> for RobotResponse {
    fn from(value: Robot) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            robot_type: value.robot_type.to_string(),
            year: value.year,
        }
    }
}

/// Identity of a robot returned by a point lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RobotSummary {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Marta")]
    pub name: String,
}

impl From<Robot> for RobotSummary {
    fn from(value: Robot) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
        }
    }
}

/// Point lookup outcome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status")]
pub enum LookupEnvelope {
    #[serde(rename = "FOUND")]
    Found { data: RobotSummary },
    #[serde(rename = "NOT-FOUND")]
    NotFound {},
}

/// Write outcome.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status")]
pub enum WriteEnvelope {
    /// The write was applied. Only creates carry `data`.
    #[serde(rename = "OK")]
    Accepted {
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<RobotResponse>,
    },
    /// Validation rejected the write; nothing was stored.
    #[serde(rename = "ERROR")]
    Rejected { messages: Vec<String> },
}

fn render_write<T>(
    result: Result<T, RobotWriteError>,
    success: StatusCode,
    data: impl FnOnce(T) -> Option<RobotResponse>,
) -> ApiResult<HttpResponse> {
    match result {
        Ok(value) => Ok(HttpResponse::build(success).json(WriteEnvelope::Accepted {
            data: data(value),
        })),
        Err(RobotWriteError::Rejected(errors)) => {
            Ok(HttpResponse::Conflict().json(WriteEnvelope::Rejected {
                messages: errors.texts(),
            }))
        }
        Err(RobotWriteError::Failed(error)) => Err(error),
    }
}

/// Parse a digits-only path segment. Values beyond `i64` name no robot.
fn parse_id(raw: &str) -> Option<RobotId> {
    match raw.parse::<i64>() {
        Ok(value) => Some(RobotId::new(value)),
        Err(error) => {
            debug!(raw, %error, "robot id out of range");
            None
        }
    }
}

fn robot_responses(robots: Vec<Robot>) -> Vec<RobotResponse> {
    robots.into_iter().map(RobotResponse::from).collect()
}

/// List every robot ordered by name.
#[utoipa::path(
    get,
    path = "/api/robots",
    responses(
        (status = 200, description = "All robots", body = [RobotResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["robots"],
    operation_id = "listRobots"
)]
#[get("/robots")]
pub async fn list_robots(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RobotResponse>>> {
    let robots = state.robots_query.list_robots().await?;
    Ok(web::Json(robot_responses(robots)))
}

/// Find robots whose name contains the fragment, ignoring case.
#[utoipa::path(
    get,
    path = "/api/robots/search/{name}",
    params(("name" = String, Path, description = "Name fragment to look for")),
    responses(
        (status = 200, description = "Matching robots", body = [RobotResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["robots"],
    operation_id = "searchRobots"
)]
#[get("/robots/search/{name}")]
pub async fn search_robots(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RobotResponse>>> {
    let fragment = path.into_inner();
    let robots = state.robots_query.search_robots(&fragment).await?;
    Ok(web::Json(robot_responses(robots)))
}

/// Look a robot up by id.
#[utoipa::path(
    get,
    path = "/api/robots/{id}",
    params(("id" = i64, Path, description = "Robot identifier")),
    responses(
        (status = 200, description = "Lookup outcome", body = LookupEnvelope),
        (status = 404, description = "Identifier out of range", body = String, content_type = "text/plain"),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["robots"],
    operation_id = "getRobot"
)]
#[get("/robots/{id:\\d+}")]
pub async fn get_robot(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = parse_id(&path) else {
        return Ok(not_found_response());
    };
    let envelope = match state.robots_query.find_robot(id).await? {
        Some(robot) => LookupEnvelope::Found {
            data: RobotSummary::from(robot),
        },
        None => LookupEnvelope::NotFound {},
    };
    Ok(HttpResponse::Ok().json(envelope))
}

/// Create a robot.
#[utoipa::path(
    post,
    path = "/api/robots",
    request_body = RobotRequest,
    responses(
        (status = 201, description = "Robot created", body = WriteEnvelope),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 409, description = "Validation failed", body = WriteEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["robots"],
    operation_id = "createRobot"
)]
#[post("/robots")]
pub async fn create_robot(
    state: web::Data<HttpState>,
    payload: web::Json<RobotRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let result = state.robots_command.create_robot(draft).await;
    render_write(result, StatusCode::CREATED, |robot| {
        Some(RobotResponse::from(robot))
    })
}

/// Replace every field of a robot.
#[utoipa::path(
    put,
    path = "/api/robots/{id}",
    params(("id" = i64, Path, description = "Robot identifier")),
    request_body = RobotRequest,
    responses(
        (status = 200, description = "Robot updated, or no robot had the id", body = WriteEnvelope),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 409, description = "Validation failed", body = WriteEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["robots"],
    operation_id = "updateRobot"
)]
#[put("/robots/{id:\\d+}")]
pub async fn update_robot(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RobotRequest>,
) -> ApiResult<HttpResponse> {
    let Some(id) = parse_id(&path) else {
        return Ok(not_found_response());
    };
    let draft = payload.into_inner().into_draft()?;
    let result = state.robots_command.update_robot(id, draft).await;
    render_write(result, StatusCode::OK, |()| None)
}

/// Delete a robot.
#[utoipa::path(
    delete,
    path = "/api/robots/{id}",
    params(("id" = i64, Path, description = "Robot identifier")),
    responses(
        (status = 200, description = "Robot deleted, or no robot had the id", body = WriteEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["robots"],
    operation_id = "deleteRobot"
)]
#[delete("/robots/{id:\\d+}")]
pub async fn delete_robot(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(id) = parse_id(&path) else {
        return Ok(not_found_response());
    };
    let result = state.robots_command.delete_robot(id).await;
    render_write(result, StatusCode::OK, |()| None)
}

/// Register the robot handlers on a scope or app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_robots)
        .service(search_robots)
        .service(get_robot)
        .service(create_robot)
        .service(update_robot)
        .service(delete_robot);
}

#[cfg(test)]
#[path = "robots_tests.rs"]
mod tests;
