//! Users API handlers.
//!
//! ```text
//! GET /users
//! ```

use actix_web::{get, web};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// List every user, ordered by id.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use paintapp::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::UsersQuery;
    use crate::inbound::http::test_utils::{seeded_state, unreachable_painting_ports};

    struct OfflineUsers;

    #[async_trait]
    impl UsersQuery for OfflineUsers {
        async fn list_users(&self) -> Result<Vec<User>, Error> {
            Err(Error::service_unavailable("user repository unavailable"))
        }
    }

    #[actix_web::test]
    async fn lists_seeded_users_in_id_order() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(seeded_state()))
                .service(list_users),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!([
                {"id": 1, "username": "default1", "displayName": "User1"},
                {"id": 2, "username": "default2", "displayName": "User2"},
                {"id": 3, "username": "default3", "displayName": "User3"},
            ])
        );
    }

    #[actix_web::test]
    async fn repository_outage_is_service_unavailable() {
        let (paintings, painting_queries) = unreachable_painting_ports();
        let state = HttpState::new(Arc::new(OfflineUsers), paintings, painting_queries);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_users),
        )
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some("service_unavailable")
        );
    }
}
