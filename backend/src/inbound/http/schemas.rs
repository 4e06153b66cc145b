//! OpenAPI stand-ins for domain types.
//!
//! The domain crate does not depend on utoipa, so the error body is
//! described here and registered under the domain type's name.

use utoipa::ToSchema;

/// Error codes as they appear on the wire.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode, rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// Malformed or incomplete request body.
    InvalidRequest,
    /// Storage could not be reached.
    ServiceUnavailable,
    /// Unexpected failure; the message is redacted.
    InternalError,
}

/// Body of every non-envelope error response.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "schema-only type")]
pub struct ErrorSchema {
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    #[schema(example = "robot store unavailable")]
    message: String,
    /// Matches the `trace-id` response header.
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    trace_id: Option<String>,
    /// Machine-readable context, such as the offending field.
    #[schema(example = json!({"field": "year", "code": "missing_field"}))]
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> Value {
        serde_json::to_value(T::schema()).expect("schema serialises")
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn codes_are_listed_in_snake_case(#[case] code: &str) {
        let rendered = schema_json::<ErrorCodeSchema>().to_string();

        assert!(rendered.contains(&format!("\"{code}\"")), "missing {code}");
    }

    #[rstest]
    fn error_body_requires_code_and_message_only() {
        let schema = schema_json::<ErrorSchema>();
        let properties = schema["properties"].as_object().expect("properties");

        assert!(properties.contains_key("traceId"));
        assert!(properties.contains_key("details"));
        assert_eq!(schema["required"], serde_json::json!(["code", "message"]));
    }
}
