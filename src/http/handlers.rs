//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Admin-gated endpoints resolve the caller's role
//! from storage on every request.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::auth::AuthUser;
use super::dto::{
    CreateProgramRequest, CreateProgramResponse, DetailsErrorResponse, HealthResponse,
    MsgResponse, ProgramResponse, ProgramSummary, SetDetailsRequest, SetDetailsResponse,
    UpdateProgramRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ProgramTypeId, UserId};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Resolve the caller's role and fail with 401 unless they are an admin.
///
/// `denied_msg` matches the endpoint-specific wording of the API.
async fn ensure_admin(
    state: &AppState,
    user_id: UserId,
    denied_msg: &str,
) -> Result<(), AppError> {
    let is_admin = db_services::is_admin(state.repository.as_ref(), user_id).await?;
    if !is_admin {
        warn!(user_id = user_id.value(), "admin check failed");
        return Err(AppError::Unauthorized(denied_msg.to_string()));
    }
    Ok(())
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Program Type CRUD
// =============================================================================

/// GET /programs
///
/// List all program types. No authentication required.
pub async fn list_programs(State(state): State<AppState>) -> HandlerResult<Vec<ProgramSummary>> {
    let programs = db_services::list_program_types(state.repository.as_ref()).await?;
    Ok(Json(programs.into_iter().map(Into::into).collect()))
}

/// POST /program
///
/// Create a program type. Admin only; a duplicate type name is a 409.
pub async fn create_program(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateProgramRequest>,
) -> Result<(StatusCode, Json<CreateProgramResponse>), AppError> {
    ensure_admin(&state, auth.user_id, "Unauthorized").await?;

    match db_services::create_program_type(state.repository.as_ref(), &request.into()).await {
        Ok(program) => Ok((
            StatusCode::CREATED,
            Json(CreateProgramResponse {
                msg: "Program created".to_string(),
                program: program.id.value(),
            }),
        )),
        Err(e) if e.is_conflict() => Err(AppError::Conflict(
            "Program with this name already exists".to_string(),
        )),
        Err(e) => {
            error!("failed to create program type: {}", e);
            Err(AppError::internal_with_detail(
                "Error creating program",
                e.to_string(),
            ))
        }
    }
}

/// GET /program/{program_id}
///
/// Fetch a single program type. Requires authentication, not admin.
pub async fn get_program(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(program_id): Path<i64>,
) -> HandlerResult<ProgramResponse> {
    let id = ProgramTypeId::new(program_id);
    let program = db_services::get_program_type(state.repository.as_ref(), id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Program type {} not found", program_id))
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(program.into()))
}

/// POST /program/{program_id}
///
/// Partially update a program type. Admin only; absent fields keep their
/// stored values.
pub async fn update_program(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(program_id): Path<i64>,
    Json(request): Json<UpdateProgramRequest>,
) -> HandlerResult<MsgResponse> {
    ensure_admin(&state, auth.user_id, "Admin access required").await?;

    let id = ProgramTypeId::new(program_id);
    db_services::update_program_type(state.repository.as_ref(), id, &request.into())
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Program type {} not found", program_id))
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(MsgResponse::new("Program updated")))
}

/// DELETE /program/{program_id}
///
/// Delete a program type. Admin only.
pub async fn delete_program(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(program_id): Path<i64>,
) -> HandlerResult<MsgResponse> {
    ensure_admin(&state, auth.user_id, "Admin access required").await?;

    let id = ProgramTypeId::new(program_id);
    db_services::delete_program_type(state.repository.as_ref(), id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Program type {} not found", program_id))
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Json(MsgResponse::new("Program deleted")))
}

/// POST /program/setDetails
///
/// Overwrite the full detail set of a program type (course link, locations,
/// auto-approval, meeting limits). Requires authentication; this endpoint
/// does not require the admin role.
///
/// The response shapes differ from the rest of the API: `message` on
/// success, `error` on failure.
pub async fn set_program_details(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<SetDetailsRequest>,
) -> Response {
    let id = ProgramTypeId::new(request.data.id);
    let details = request.into_details();

    match db_services::set_program_details(state.repository.as_ref(), id, &details).await {
        Ok(_) => (
            StatusCode::OK,
            Json(SetDetailsResponse {
                message: "Program type updated successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) if e.is_not_found() => (
            StatusCode::NOT_FOUND,
            Json(DetailsErrorResponse {
                error: "Program type doesn't exist".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("failed to set program details: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DetailsErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
