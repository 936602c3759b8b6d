use crate::errors::ApiError;
use crate::models::Course;
use crate::openapi::COURSES_TAG;
use crate::state::AppState;
use crate::store::StoreBackend;
use crate::upstream::courses::CourseListQuery;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http::StatusCode;

/// Store key for the mirrored course listing
pub(crate) const COURSES_KEY: &str = "courses";

pub(crate) fn course_key(course_id: i64) -> String {
    format!("course:{}", course_id)
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = COURSES_TAG,
    responses(
        (status = 200, description = "Course listing", body = Vec<Course>),
        (status = 502, description = "Upstream communication failure")
    )
)]
pub(super) async fn list_courses(State(state): State<AppState>) -> Response {
    // Serve the local mirror when it has anything; an empty or failed
    // lookup falls through to the upstream fetch.
    match state.store.get::<Vec<Course>>(COURSES_KEY).await {
        Ok(Some(courses)) if !courses.is_empty() => {
            return (StatusCode::OK, Json(courses)).into_response();
        }
        Ok(_) => {}
        Err(err) => {
            log::warn!("Mirror lookup failed, falling back to upstream: {}", err);
        }
    }

    let mut client = state.lms_client();
    let value = match client.courses_list(&CourseListQuery::default()).await {
        Ok(value) => value,
        Err(err) => {
            log::error!("Failed to fetch courses from the LMS: {}", err);
            return ApiError::from(err).into_response();
        }
    };

    let courses: Vec<Course> = match serde_json::from_value(value) {
        Ok(courses) => courses,
        Err(err) => {
            log::error!("Unexpected course payload from the LMS: {}", err);
            return ApiError::bad_gateway(format!(
                "Unexpected course payload from the LMS: {}",
                err
            ))
            .into_response();
        }
    };

    if let Err(err) = state.store.set(COURSES_KEY, &courses).await {
        log::warn!("Failed to mirror course listing: {}", err);
    }
    (StatusCode::OK, Json(courses)).into_response()
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    tag = COURSES_TAG,
    params(
        ("id" = i64, Path, description = "Upstream course identifier"),
    ),
    responses(
        (status = 200, description = "Course detail", body = Course),
        (status = 502, description = "Upstream communication failure")
    )
)]
pub(super) async fn course_detail(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    let key = course_key(course_id);
    match state.store.get::<Course>(&key).await {
        Ok(Some(course)) => {
            return (StatusCode::OK, Json(course)).into_response();
        }
        Ok(None) => {}
        Err(err) => {
            log::warn!("Mirror lookup failed, falling back to upstream: {}", err);
        }
    }

    let mut client = state.lms_client();
    let value = match client.course_detail(course_id).await {
        Ok(value) => value,
        Err(err) => {
            log::error!("Failed to fetch course {} from the LMS: {}", course_id, err);
            return ApiError::from(err).into_response();
        }
    };

    let course: Course = match serde_json::from_value(value) {
        Ok(course) => course,
        Err(err) => {
            log::error!("Unexpected course payload from the LMS: {}", err);
            return ApiError::bad_gateway(format!(
                "Unexpected course payload from the LMS: {}",
                err
            ))
            .into_response();
        }
    };

    if let Err(err) = state.store.set(&key, &course).await {
        log::warn!("Failed to mirror course {}: {}", course_id, err);
    }
    (StatusCode::OK, Json(course)).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/{id}", get(course_detail))
}
