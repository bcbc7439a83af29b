//! Axum handlers for the family insights and analytics views.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Local;
use tracing::info;

use super::AppState;

/// Axum handler function for GET /api/insights/family
pub async fn family_insights(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/insights/family");

    match state.member_service.list_members() {
        Ok(result) => {
            let today = Local::now().date_naive();
            let response = state.insights_service.family_insights(&result.members, today);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Error computing family insights: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error computing family insights")
                .into_response()
        }
    }
}

/// Axum handler function for GET /api/insights/analytics
pub async fn membership_analytics(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/insights/analytics");

    match state.member_service.list_members() {
        Ok(result) => {
            let today = Local::now().date_naive();
            let response = state
                .insights_service
                .membership_analytics(&result.members, today);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Error computing membership analytics: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error computing membership analytics",
            )
                .into_response()
        }
    }
}
