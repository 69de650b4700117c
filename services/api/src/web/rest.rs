//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    AnonymizedPayload, AssessRequest, AssessResponse, AssessmentPayload, HealthResponse,
    IngestResponse, IngestSummary, MessageResponse, PreferenceRequest, WireInputType,
    WireRiskLevel, WireStoragePreference,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use emotion_assessment_core::{AnonymizedAssessment, Assessment};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        assess_handler,
        list_assessments_handler,
        delete_assessment_handler,
        set_preference_handler,
        ingest_full_handler,
        ingest_anonymous_handler,
    ),
    components(
        schemas(
            AssessRequest,
            AssessResponse,
            AssessmentPayload,
            AnonymizedPayload,
            PreferenceRequest,
            HealthResponse,
            IngestResponse,
            IngestSummary,
            MessageResponse,
            WireInputType,
            WireRiskLevel,
            WireStoragePreference,
        )
    ),
    tags(
        (name = "Emotion Assessment API", description = "Assess free-form text and route the result by the user's data-sharing policy.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Helpers
//=========================================================================================

/// Reads and parses the `x-user-id` header.
fn user_id_from(headers: &HeaderMap) -> Result<Uuid, (StatusCode, String)> {
    let user_id_str = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "x-user-id header is required".to_string(),
            )
        })?;

    Uuid::parse_str(user_id_str).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid x-user-id format".to_string(),
        )
    })
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Emotion assessment service is running".to_string(),
    })
}

/// Assess a text and store the result according to the user's data-sharing policy.
///
/// Any text, including an empty one, produces an assessment. The request only fails
/// when the local save fails.
#[utoipa::path(
    post,
    path = "/assessments",
    request_body = AssessRequest,
    responses(
        (status = 201, description = "Assessment created and stored", body = AssessResponse),
        (status = 400, description = "Bad request (e.g., missing header)"),
        (status = 500, description = "Local persistence failed")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn assess_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AssessRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = user_id_from(&headers)?;

    let user = app_state.users.get_user(user_id).await.map_err(|e| {
        error!("Failed to look up user {}: {:?}", user_id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to look up user".to_string(),
        )
    })?;

    let evaluation = app_state
        .engine
        .evaluate(&request.text, request.input_type.into(), user_id);
    let payload = AssessmentPayload::from(&evaluation.assessment);

    match app_state
        .router
        .save(evaluation.assessment, user.data_storage_preference)
        .await
    {
        Ok(dispatch) => {
            info!(
                "Assessment {} stored for user {} ({:?}).",
                payload.id, user_id, dispatch
            );
            let response = AssessResponse {
                assessment: payload,
                suggestions: evaluation.suggestions,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to save assessment: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save assessment".to_string(),
            ))
        }
    }
}

/// List the user's assessments, newest first.
#[utoipa::path(
    get,
    path = "/assessments",
    responses(
        (status = 200, description = "The user's assessment history", body = Vec<AssessmentPayload>),
        (status = 400, description = "Bad request (e.g., missing header)")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn list_assessments_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<AssessmentPayload>>, (StatusCode, String)> {
    let user_id = user_id_from(&headers)?;
    let history = app_state.router.history(user_id).await;
    Ok(Json(history.iter().map(AssessmentPayload::from).collect()))
}

/// Delete an assessment from the local store. Always succeeds from the caller's view.
#[utoipa::path(
    delete,
    path = "/assessments/{id}",
    responses((status = 204, description = "Deletion attempted")),
    params(("id" = Uuid, Path, description = "The assessment ID."))
)]
pub async fn delete_assessment_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    app_state.router.delete(id).await;
    StatusCode::NO_CONTENT
}

/// Set the user's data-sharing policy.
#[utoipa::path(
    put,
    path = "/users/preference",
    request_body = PreferenceRequest,
    responses(
        (status = 204, description = "Preference updated"),
        (status = 400, description = "Bad request (e.g., missing header)"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "The unique ID of the user.")
    )
)]
pub async fn set_preference_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<PreferenceRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let user_id = user_id_from(&headers)?;
    app_state
        .users
        .set_storage_preference(user_id, request.data_storage_preference.into())
        .await
        .map_err(|e| {
            error!("Failed to update preference for user {}: {:?}", user_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update preference".to_string(),
            )
        })?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remote ingest of a full assessment record.
#[utoipa::path(
    post,
    path = "/api/assessments",
    request_body = AssessmentPayload,
    responses(
        (status = 201, description = "Record stored", body = IngestResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn ingest_full_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<AssessmentPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let assessment = Assessment::from(payload);
    if let Err(e) = app_state.archive.save_full(&assessment).await {
        error!("Failed to store uploaded assessment {}: {:?}", assessment.id, e);
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()));
    }

    let response = IngestResponse {
        success: true,
        assessment: IngestSummary {
            positive_score: assessment.positive_score,
            negative_score: assessment.negative_score,
            stress_level: assessment.stress_level,
            anxiety_level: assessment.anxiety_level,
            risk_level: assessment.risk_level.into(),
            report_text: assessment.report_text,
        },
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Remote ingest of an anonymized assessment.
#[utoipa::path(
    post,
    path = "/api/assessments/anonymous",
    request_body = AnonymizedPayload,
    responses(
        (status = 201, description = "Record stored", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn ingest_anonymous_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<AnonymizedPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let record = AnonymizedAssessment::from(payload);
    if let Err(e) = app_state.archive.save_anonymous(&record).await {
        error!("Failed to store anonymized assessment: {:?}", e);
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()));
    }

    let response = MessageResponse {
        message: "Anonymized assessment stored".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}
