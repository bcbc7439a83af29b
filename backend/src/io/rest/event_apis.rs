//! Axum handler for the upcoming-events dashboard feed.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use shared::UpcomingEventsResponse;
use tracing::info;

use super::AppState;
use crate::domain::event_scheduler::DASHBOARD_HORIZON_DAYS;
use crate::io::rest::mappers::MemberMapper;

/// Query parameters for the upcoming events endpoint
#[derive(Deserialize, Debug)]
pub struct UpcomingEventsQuery {
    pub horizon: Option<i64>,
}

/// Axum handler function for GET /api/events/upcoming
pub async fn upcoming_events(
    State(state): State<AppState>,
    Query(query): Query<UpcomingEventsQuery>,
) -> impl IntoResponse {
    info!("GET /api/events/upcoming - query: {:?}", query);

    let horizon_days = query.horizon.unwrap_or(DASHBOARD_HORIZON_DAYS);
    if horizon_days < 0 {
        return (StatusCode::BAD_REQUEST, "Horizon must not be negative").into_response();
    }

    let members = match state.member_service.list_members() {
        Ok(result) => result.members,
        Err(e) => {
            tracing::error!("Error loading members for events: {:?}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading members")
                .into_response();
        }
    };

    // Captured once so every event in the response agrees on the reference day
    let today = Local::now().date_naive();
    let events = state
        .event_scheduler
        .upcoming_events(&members, today, horizon_days);
    let buckets = state.event_scheduler.bucket_events(&events);

    let response = UpcomingEventsResponse {
        horizon_days,
        events: events.into_iter().map(MemberMapper::event_to_dto).collect(),
        today: buckets
            .today
            .into_iter()
            .map(MemberMapper::event_to_dto)
            .collect(),
        this_week: buckets
            .this_week
            .into_iter()
            .map(MemberMapper::event_to_dto)
            .collect(),
        this_month: buckets
            .this_month
            .into_iter()
            .map(MemberMapper::event_to_dto)
            .collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}
