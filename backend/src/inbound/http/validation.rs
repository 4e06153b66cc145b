//! Request framing checks for inbound HTTP adapters.
//!
//! Failures here happen before any domain call and are reported as
//! `invalid_request` errors, distinct from the 409 envelope produced when a
//! well-formed robot breaks a field rule.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Error for a required body field that was absent or `null`.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn json_payload_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "rejected request body");
    let code = match err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "payload_too_large"
        }
        _ => "invalid_json",
    };
    Error::invalid_request("request body is not a valid robot")
        .with_details(json!({ "code": code, "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration rendering framing failures as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_payload_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn missing_field_error_names_the_field() {
        let err = missing_field_error("year");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "year", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn content_type_failures_are_bad_requests() {
        let req = TestRequest::default().to_http_request();

        let err = json_payload_error(JsonPayloadError::ContentType, &req);

        assert_eq!(
            err.as_response_error().status_code(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
    }
}
