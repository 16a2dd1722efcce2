use crate::calendar::{MonthRef, date_key, parse_date_key};
use crate::errors::AppError;
use crate::models::{
    DEFAULT_COLOR, Habit, MonthQuery, MonthView, NewHabitRequest, ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

pub async fn index() -> Html<String> {
    Html(render_index(&date_key(today())))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    let tracker = state.tracker.lock().await;
    Json(tracker.habits().to_vec())
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let color = payload
        .color
        .as_deref()
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .unwrap_or(DEFAULT_COLOR)
        .to_string();

    let habit = with_tracker(&state, move |tracker| {
        tracker.add_habit(&payload.name, &color)
    })
    .await??;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
) -> Result<StatusCode, AppError> {
    with_tracker(&state, move |tracker| tracker.delete_habit(&habit_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_progress(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let date = parse_date_key(&payload.date)
        .ok_or_else(|| AppError::bad_request("date must be formatted as YYYY-MM-DD"))?;

    let habit_id = payload.habit_id.clone();
    let completed = with_tracker(&state, move |tracker| tracker.toggle(&habit_id, date)).await?;
    Ok(Json(ToggleResponse {
        habit_id: payload.habit_id,
        date: date_key(date),
        completed,
    }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthView>, AppError> {
    let mut tracker = state.tracker.lock().await;
    if let (Some(year), Some(month)) = (query.year, query.month) {
        let target = MonthRef::checked(year, month)
            .ok_or_else(|| AppError::bad_request("month out of range"))?;
        tracker.show_month(target);
    }
    Ok(Json(tracker.month_view(today())))
}

pub async fn prev_month(State(state): State<AppState>) -> Json<MonthView> {
    let mut tracker = state.tracker.lock().await;
    tracker.prev_month();
    Json(tracker.month_view(today()))
}

pub async fn next_month(State(state): State<AppState>) -> Json<MonthView> {
    let mut tracker = state.tracker.lock().await;
    tracker.next_month();
    Json(tracker.month_view(today()))
}

/// Runs a persisting tracker operation on the blocking pool. The lock is
/// held across the write, so writes land in the order they were made.
async fn with_tracker<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&mut Tracker) -> T + Send + 'static,
{
    let tracker = Arc::clone(&state.tracker);
    tokio::task::spawn_blocking(move || {
        let mut guard = tracker.blocking_lock();
        op(&mut guard)
    })
    .await
    .map_err(AppError::internal)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
