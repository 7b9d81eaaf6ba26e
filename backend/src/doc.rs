//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint plus the schema wrappers from
//! [`crate::inbound::http::schemas`]. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for client tooling.

use utoipa::OpenApi;

use crate::inbound::http::paintings::SavePaintingRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PaintingSchema, UserSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paintapp backend API",
        description = "Users and their single saved painting, plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::paintings::save_painting,
        crate::inbound::http::paintings::paintings_for_user,
        crate::inbound::http::paintings::painting_by_id,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        PaintingSchema,
        SavePaintingRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Seeded user accounts"),
        (name = "paintings", description = "Saving and loading paintings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("User", &["id", "username", "displayName"])]
    #[case("Painting", &["id", "title", "shapesData", "createdAt", "user"])]
    #[case("SavePaintingRequest", &["userId", "title", "shapesData"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users",
            "/paintings",
            "/paintings/{userId}",
            "/paintings/by-id/{paintingId}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
