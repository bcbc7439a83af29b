//! Axum handlers for member CRUD and family (spouse/children) management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::{
    AddChildRequest, CreateMemberRequest, DeleteMemberResponse, MemberListResponse,
    MemberResponse, SetSpouseRequest, UpdateMemberRequest,
};
use tracing::info;

use super::{domain_error_response, AppState};
use crate::domain::commands::members::{
    AddChildCommand, ClearSpouseCommand, CreateMemberCommand, DeleteMemberCommand,
    GetMemberCommand, RemoveChildCommand, SetSpouseCommand, UpdateMemberCommand,
};
use crate::io::rest::mappers::MemberMapper;

/// Axum handler function for GET /api/members
pub async fn list_members(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/members");

    match state.member_service.list_members() {
        Ok(result) => {
            let response = MemberListResponse {
                members: result.members.iter().map(MemberMapper::member_to_dto).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Error listing members: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing members").into_response()
        }
    }
}

/// Axum handler function for POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> impl IntoResponse {
    info!("POST /api/members - name: {}", request.full_name);

    let command = CreateMemberCommand {
        full_name: request.full_name,
        date_of_birth: request.date_of_birth,
        email: request.email,
        phone: request.phone,
        nationality: request.nationality,
        relationship_status: request.relationship_status.map(MemberMapper::status_from_dto),
        currently_employed: request.currently_employed,
        completed_tertiary: request.completed_tertiary,
    };

    match state.member_service.create_member(command) {
        Ok(result) => {
            let response = MemberResponse {
                member: MemberMapper::member_to_dto(&result.member),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error creating member"),
    }
}

/// Axum handler function for GET /api/members/:id
pub async fn get_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/members/{}", member_id);

    match state.member_service.get_member(GetMemberCommand { member_id }) {
        Ok(result) => match result.member {
            Some(member) => {
                let response = MemberResponse {
                    member: MemberMapper::member_to_dto(&member),
                };
                (StatusCode::OK, Json(response)).into_response()
            }
            None => (StatusCode::NOT_FOUND, "Member not found").into_response(),
        },
        Err(e) => {
            tracing::error!("Error retrieving member: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving member").into_response()
        }
    }
}

/// Axum handler function for PUT /api/members/:id
pub async fn update_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> impl IntoResponse {
    info!("PUT /api/members/{}", member_id);

    let command = UpdateMemberCommand {
        member_id,
        full_name: request.full_name,
        date_of_birth: request.date_of_birth,
        email: request.email,
        phone: request.phone,
        nationality: request.nationality,
        relationship_status: request.relationship_status.map(MemberMapper::status_from_dto),
        currently_employed: request.currently_employed,
        completed_tertiary: request.completed_tertiary,
    };

    match state.member_service.update_member(command) {
        Ok(result) => {
            let response = MemberResponse {
                member: MemberMapper::member_to_dto(&result.member),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error updating member"),
    }
}

/// Axum handler function for DELETE /api/members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/members/{}", member_id);

    match state
        .member_service
        .delete_member(DeleteMemberCommand { member_id })
    {
        Ok(result) => {
            let response = DeleteMemberResponse {
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error deleting member"),
    }
}

/// Axum handler function for PUT /api/members/:id/spouse
pub async fn set_spouse(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<SetSpouseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/members/{}/spouse", member_id);

    let command = SetSpouseCommand {
        member_id,
        full_name: request.full_name,
        date_of_birth: request.date_of_birth,
        marriage_anniversary_date: request.marriage_anniversary_date,
    };

    match state.member_service.set_spouse(command) {
        Ok(result) => {
            let response = MemberResponse {
                member: MemberMapper::member_to_dto(&result.member),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error setting spouse"),
    }
}

/// Axum handler function for DELETE /api/members/:id/spouse
pub async fn clear_spouse(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/members/{}/spouse", member_id);

    match state
        .member_service
        .clear_spouse(ClearSpouseCommand { member_id })
    {
        Ok(result) => {
            let response = MemberResponse {
                member: MemberMapper::member_to_dto(&result.member),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error clearing spouse"),
    }
}

/// Axum handler function for POST /api/members/:id/children
pub async fn add_child(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<AddChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/members/{}/children", member_id);

    let command = AddChildCommand {
        member_id,
        full_name: request.full_name,
        date_of_birth: request.date_of_birth,
    };

    match state.member_service.add_child(command) {
        Ok(result) => {
            let response = MemberResponse {
                member: MemberMapper::member_to_dto(&result.member),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error adding child"),
    }
}

/// Axum handler function for DELETE /api/members/:id/children/:order
pub async fn remove_child(
    State(state): State<AppState>,
    Path((member_id, child_order)): Path<(String, u32)>,
) -> impl IntoResponse {
    info!("DELETE /api/members/{}/children/{}", member_id, child_order);

    let command = RemoveChildCommand {
        member_id,
        child_order,
    };

    match state.member_service.remove_child(command) {
        Ok(result) => {
            let response = MemberResponse {
                member: MemberMapper::member_to_dto(&result.member),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e, "Error removing child"),
    }
}
