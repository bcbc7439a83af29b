//! # REST Module
//!
//! HTTP surface of the membership tracker. Handlers stay thin: they map the
//! shared DTOs onto domain commands, invoke the services held in
//! [`AppState`], and translate domain errors into status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::domain::models::member::MemberValidationError;
use crate::domain::{EventScheduler, InsightsService, MemberService};

pub mod event_apis;
pub mod insight_apis;
pub mod mappers;
pub mod member_apis;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub member_service: Arc<MemberService>,
    pub event_scheduler: EventScheduler,
    pub insights_service: InsightsService,
}

impl AppState {
    pub fn new(member_service: Arc<MemberService>) -> Self {
        Self {
            member_service,
            event_scheduler: EventScheduler::new(),
            insights_service: InsightsService::new(),
        }
    }
}

/// Build the API router with all membership tracker routes
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/members",
            get(member_apis::list_members).post(member_apis::create_member),
        )
        .route(
            "/members/:id",
            get(member_apis::get_member)
                .put(member_apis::update_member)
                .delete(member_apis::delete_member),
        )
        .route(
            "/members/:id/spouse",
            put(member_apis::set_spouse).delete(member_apis::clear_spouse),
        )
        .route("/members/:id/children", post(member_apis::add_child))
        .route(
            "/members/:id/children/:order",
            delete(member_apis::remove_child),
        )
        .route("/events/upcoming", get(event_apis::upcoming_events))
        .route("/insights/family", get(insight_apis::family_insights))
        .route(
            "/insights/analytics",
            get(insight_apis::membership_analytics),
        );

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Translate a domain error into an HTTP response.
///
/// Validation failures are the caller's fault (400), a missing member is
/// 404, anything else is logged and reported as a server error.
fn domain_error_response(error: anyhow::Error, context: &'static str) -> Response {
    if error.downcast_ref::<MemberValidationError>().is_some() {
        return (StatusCode::BAD_REQUEST, error.to_string()).into_response();
    }
    if error.to_string().contains("not found") {
        return (StatusCode::NOT_FOUND, error.to_string()).into_response();
    }
    tracing::error!("{}: {:?}", context, error);
    (StatusCode::INTERNAL_SERVER_ERROR, context).into_response()
}
