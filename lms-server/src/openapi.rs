use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const COURSES_TAG: &str = "Courses API";
pub(crate) const USERS_TAG: &str = "Users API";
pub(crate) const SESSIONS_TAG: &str = "Sessions API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = COURSES_TAG, description = "Course listing and detail endpoints"),
        (name = USERS_TAG, description = "User invitation endpoints"),
        (name = SESSIONS_TAG, description = "Course session endpoints"),
    ),
    info(
        title = "LMS Gateway API",
        description = "REST gateway in front of the e-learning platform API",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
