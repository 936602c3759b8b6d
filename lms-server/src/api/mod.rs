pub(crate) mod courses;
pub(crate) mod health;
pub(crate) mod sessions;
pub(crate) mod users;

use crate::state::AppState;
use axum::Router;

/// Combines all API routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(courses::router())
        .merge(users::router())
        .merge(sessions::router())
}
