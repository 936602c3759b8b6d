use crate::errors::ApiError;
use crate::openapi::SESSIONS_TAG;
use crate::state::AppState;
use crate::upstream::sessions::SessionListQuery;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

fn default_session_status() -> String {
    "active".to_string()
}

/// Query parameters for the session listing
#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct SessionListParams {
    /// Session status filter, always forwarded to the LMS
    #[serde(default = "default_session_status")]
    filter: String,
    /// Page number
    #[serde(default)]
    page: Option<u32>,
    /// Page size
    #[serde(default)]
    per_page: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/courses/{id}/sessions",
    tag = SESSIONS_TAG,
    params(
        ("id" = i64, Path, description = "Upstream course identifier"),
        SessionListParams,
    ),
    responses(
        (status = 200, description = "Session listing, passed through from the LMS"),
        (status = 502, description = "Upstream communication failure")
    )
)]
pub(super) async fn list_course_sessions(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(params): Query<SessionListParams>,
) -> Response {
    let query = SessionListQuery {
        page: params.page,
        per_page: params.per_page,
        participant_ids: None,
    };

    let mut client = state.lms_client();
    match client
        .course_sessions_list(course_id, &params.filter, &query)
        .await
    {
        Ok(sessions) => (StatusCode::OK, Json(sessions)).into_response(),
        Err(err) => {
            log::error!(
                "Failed to list sessions of course {} from the LMS: {}",
                course_id,
                err
            );
            ApiError::from(err).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/register",
    tag = SESSIONS_TAG,
    params(
        ("id" = i64, Path, description = "Upstream session identifier"),
    ),
    responses(
        (status = 200, description = "Registration result, passed through from the LMS"),
        (status = 502, description = "Upstream communication failure")
    )
)]
pub(super) async fn register_user_for_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(payload): Json<Value>,
) -> Response {
    let mut client = state.lms_client();
    match client.register_for_session(session_id, &payload).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            log::error!(
                "Failed to register user for session {} on the LMS: {}",
                session_id,
                err
            );
            ApiError::from(err).into_response()
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses/{id}/sessions", get(list_course_sessions))
        .route("/sessions/{id}/register", post(register_user_for_session))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::TestFixture;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_list_sessions_defaults_the_status_filter_to_active() {
        let fixture = TestFixture::new().await;
        fixture.mock_valid_token().await;

        Mock::given(method("GET"))
            .and(path("/endpoint/v1/courses/5/course_sessions"))
            .and(query_param("filter", "active"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 9, "status": "active"}])),
            )
            .expect(1)
            .mount(&fixture.upstream_mock)
            .await;

        let response = fixture.get("/courses/5/sessions").await;
        response.assert_ok();
        assert_eq!(response.json[0]["id"], 9);

        fixture.upstream_mock.verify().await;
    }

    #[tokio::test]
    async fn test_list_sessions_forwards_an_explicit_filter() {
        let fixture = TestFixture::new().await;
        fixture.mock_valid_token().await;

        Mock::given(method("GET"))
            .and(path("/endpoint/v1/courses/5/course_sessions"))
            .and(query_param("filter", "ended"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&fixture.upstream_mock)
            .await;

        let response = fixture.get("/courses/5/sessions?filter=ended&page=2").await;
        response.assert_ok();

        fixture.upstream_mock.verify().await;
    }

    #[tokio::test]
    async fn test_register_passes_the_payload_through() {
        let fixture = TestFixture::new().await;
        fixture.mock_valid_token().await;

        let payload = json!({"email": "a@b.com", "phone": 792177788666i64, "user_id": 42});
        Mock::given(method("POST"))
            .and(path("/endpoint/v1/course_sessions/9/register"))
            .and(body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&fixture.upstream_mock)
            .await;

        let response = fixture.post("/sessions/9/register", &payload).await;
        response.assert_ok();
        assert_eq!(response.json["success"], true);

        fixture.upstream_mock.verify().await;
    }
}
