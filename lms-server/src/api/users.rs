use crate::errors::ApiError;
use crate::models::MirroredUser;
use crate::openapi::USERS_TAG;
use crate::state::AppState;
use crate::store::StoreBackend;
use crate::upstream::users::NewUser;
use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use http::StatusCode;

pub(crate) fn user_key(user_id: i64) -> String {
    format!("user:{}", user_id)
}

/// Invite a user to the platform account.
///
/// The minimal input is expanded into the upstream creation payload by the
/// client; the records the upstream reports back are mirrored locally.
#[utoipa::path(
    post,
    path = "/users",
    tag = USERS_TAG,
    request_body = NewUser,
    responses(
        (status = 200, description = "Users created upstream and mirrored", body = Vec<MirroredUser>),
        (status = 422, description = "Invalid request payload"),
        (status = 502, description = "Upstream communication failure")
    )
)]
pub(super) async fn create_user(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Response {
    let mut client = state.lms_client();
    let value = match client.create_user(&new_user).await {
        Ok(value) => value,
        Err(err) => {
            log::error!("Failed to create user on the LMS: {}", err);
            return ApiError::from(err).into_response();
        }
    };

    let users: Vec<MirroredUser> = match serde_json::from_value(value) {
        Ok(users) => users,
        Err(err) => {
            log::error!("Unexpected user payload from the LMS: {}", err);
            return ApiError::bad_gateway(format!(
                "Unexpected user payload from the LMS: {}",
                err
            ))
            .into_response();
        }
    };

    for user in &users {
        if let Err(err) = state.store.set(&user_key(user.id), user).await {
            log::warn!("Failed to mirror user {}: {}", user.id, err);
        }
    }
    (StatusCode::OK, Json(users)).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(create_user))
}
