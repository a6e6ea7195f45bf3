use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    get_default_meeting_details, validate_meeting_details, validate_zoom_config, JoinCredentials,
    MeetingDetails, SignedMeeting, ZoomClientConfig,
};
use crate::state::AppState;

/// Meeting routes
pub fn meeting_routes() -> Router<AppState> {
    Router::new()
        .route("/defaults", get(get_defaults))
        .route("/signature", post(create_signature))
        .route("/signature/verify", post(verify_signature))
        .route("/config/validate", post(validate_config))
}

#[derive(Debug, Serialize)]
pub struct ValidateConfigResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct VerifySignatureRequest {
    pub signature: String,
}

/// GET /api/v1/meetings/defaults - Blank join form
async fn get_defaults() -> Json<MeetingDetails> {
    Json(get_default_meeting_details())
}

/// POST /api/v1/meetings/signature - Issue join credentials for the client SDK
async fn create_signature(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MeetingDetails>, JsonRejection>,
) -> Result<Json<JoinCredentials>> {
    let Json(details) = payload?;
    if let Err(err) = validate_meeting_details(&details) {
        tracing::debug!(error = %err, "Rejected meeting details");
        return Err(err.into());
    }

    let credentials = state.signer.initialize_meeting(&details).await?;
    Ok(Json(credentials))
}

/// POST /api/v1/meetings/signature/verify - Check a previously issued signature
async fn verify_signature(
    State(state): State<AppState>,
    payload: std::result::Result<Json<VerifySignatureRequest>, JsonRejection>,
) -> Result<Json<SignedMeeting>> {
    let Json(request) = payload?;
    let signed = state.signer.verify_signature(&request.signature, Utc::now())?;
    Ok(Json(signed))
}

/// POST /api/v1/meetings/config/validate - Is the SDK init bundle complete?
async fn validate_config(
    payload: std::result::Result<Json<ZoomClientConfig>, JsonRejection>,
) -> Result<Json<ValidateConfigResponse>> {
    let Json(config) = payload?;
    Ok(Json(ValidateConfigResponse {
        valid: validate_zoom_config(&config),
    }))
}
