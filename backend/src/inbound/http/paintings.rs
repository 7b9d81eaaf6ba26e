//! Painting HTTP handlers.
//!
//! ```text
//! POST /paintings {"userId":1,"title":"Sunrise","shapesData":"[...]"}
//! GET /paintings/{userId}
//! GET /paintings/by-id/{paintingId}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Painting, PaintingDraft, PaintingId, ShapesData, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PaintingSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_i64_id};

/// Request payload for saving a user's painting.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePaintingRequest {
    /// Owner of the painting; must be an existing user.
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "Sunrise")]
    pub title: String,
    /// Opaque shape payload stored verbatim.
    #[schema(example = "[{\"type\":\"circle\"}]")]
    pub shapes_data: String,
}

impl From<SavePaintingRequest> for PaintingDraft {
    fn from(value: SavePaintingRequest) -> Self {
        Self {
            user_id: UserId::new(value.user_id),
            title: value.title,
            shapes_data: ShapesData::from(value.shapes_data),
        }
    }
}

/// Save a painting, replacing whatever the user saved before.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use paintapp::inbound::http::paintings::save_painting;
///
/// let app = App::new().service(save_painting);
/// ```
#[utoipa::path(
    post,
    path = "/paintings",
    request_body = SavePaintingRequest,
    responses(
        (status = 200, description = "Stored painting", body = PaintingSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Constraint violation", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["paintings"],
    operation_id = "savePainting"
)]
#[post("/paintings")]
pub async fn save_painting(
    state: web::Data<HttpState>,
    payload: web::Json<SavePaintingRequest>,
) -> ApiResult<web::Json<Painting>> {
    let painting = state
        .paintings
        .save_painting(payload.into_inner().into())
        .await?;
    info!(
        user_id = %painting.user().id(),
        painting_id = %painting.id(),
        "painting saved"
    );
    Ok(web::Json(painting))
}

/// Fetch the painting saved by a user as a zero- or one-element list.
#[utoipa::path(
    get,
    path = "/paintings/{userId}",
    params(("userId" = i64, Path, description = "Owner of the painting")),
    responses(
        (status = 200, description = "The user's painting, if any", body = [PaintingSchema]),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["paintings"],
    operation_id = "getPaintingsForUser"
)]
#[get("/paintings/{userId}")]
pub async fn paintings_for_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Painting>>> {
    let user_id = UserId::new(parse_i64_id(&path, FieldName::new("userId"))?);
    let painting = state.painting_queries.painting_for_user(&user_id).await?;
    Ok(web::Json(painting.into_iter().collect()))
}

/// Fetch a single painting by its identifier.
#[utoipa::path(
    get,
    path = "/paintings/by-id/{paintingId}",
    params(("paintingId" = i64, Path, description = "Painting identifier")),
    responses(
        (status = 200, description = "Painting", body = PaintingSchema),
        (status = 400, description = "Invalid painting id", body = ErrorSchema),
        (status = 404, description = "Painting not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["paintings"],
    operation_id = "getPaintingById"
)]
#[get("/paintings/by-id/{paintingId}")]
pub async fn painting_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Painting>> {
    let id = PaintingId::new(parse_i64_id(&path, FieldName::new("paintingId"))?);
    let painting = state.painting_queries.painting_by_id(&id).await?;
    Ok(web::Json(painting))
}

#[cfg(test)]
#[path = "paintings_tests.rs"]
mod tests;
