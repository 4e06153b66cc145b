//! Fallback for requests no route matched.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

/// Body returned for unmatched routes.
pub const NOT_FOUND_BODY: &str = "This is crazy, but this page was not found!";

/// Plain-text 404 response shared by the default service and handlers that
/// reject a path after routing.
pub fn not_found_response() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::plaintext())
        .body(NOT_FOUND_BODY)
}

/// Default service for the application.
pub async fn not_found() -> HttpResponse {
    not_found_response()
}
