//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A storage constraint rejected the write.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user 7 not found")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "default1")]
    username: String,
    #[schema(example = "User1")]
    display_name: String,
}

/// OpenAPI schema for [`crate::domain::Painting`].
#[derive(ToSchema)]
#[schema(as = Painting, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PaintingSchema {
    /// Store-generated identifier.
    #[schema(example = 12)]
    id: i64,
    #[schema(example = "Sunrise")]
    title: String,
    /// Opaque shape payload, returned exactly as saved.
    #[schema(example = "[{\"type\":\"circle\"}]")]
    shapes_data: String,
    #[schema(format = "date-time", example = "2025-03-14T09:26:53Z")]
    created_at: String,
    /// Owning user.
    user: UserSchema,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn schemas_use_domain_names() {
        assert_eq!(ErrorCodeSchema::name(), "ErrorCode");
        assert_eq!(ErrorSchema::name(), "Error");
        assert_eq!(UserSchema::name(), "User");
        assert_eq!(PaintingSchema::name(), "Painting");
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn field_names_match_wire_format() {
        let error_json = schema_to_json::<ErrorSchema>();
        assert!(error_json.contains("traceId"));

        let painting_json = schema_to_json::<PaintingSchema>();
        assert!(painting_json.contains("shapesData"));
        assert!(painting_json.contains("createdAt"));

        let user_json = schema_to_json::<UserSchema>();
        assert!(user_json.contains("displayName"));
    }
}
