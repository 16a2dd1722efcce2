use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/progress/toggle", post(handlers::toggle_progress))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/prev", post(handlers::prev_month))
        .route("/api/calendar/next", post(handlers::next_month))
        .with_state(state)
}
