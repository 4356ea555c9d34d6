/// Organizer-only submission administration
///
/// # Endpoints
///
/// - `POST /v1/admin/submissions/:id/status` - Move a submission through
///   the review workflow
/// - `POST /v1/admin/submissions/:id/payed` - Flip the payment flag
///
/// Both require a committee-member token; participants get a 403. Status
/// changes must follow the workflow (`submitted` → `under-review` →
/// `accepted`/`rejected`); anything else is a 409.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use confdesk_shared::{
    auth::middleware::AuthContext,
    models::submission::{Submission, SubmissionStatus},
    policy,
};
use serde::Deserialize;

/// Status change request
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// New workflow status
    pub status: SubmissionStatus,
}

/// Payment flag request
#[derive(Debug, Deserialize)]
pub struct SetPayedRequest {
    /// Whether the registration fee has been paid
    pub payed: bool,
}

/// Moves a submission to a new workflow status
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a committee member
/// - `404 Not Found`: submission does not exist
/// - `409 Conflict`: transition not allowed by the workflow
pub async fn set_submission_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<Json<Submission>> {
    policy::require_organizer(auth.role)?;

    let submission = Submission::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    if !submission.status.can_transition_to(req.status) {
        return Err(ApiError::Conflict(format!(
            "Cannot move submission from '{}' to '{}'",
            submission.status.as_str(),
            req.status.as_str()
        )));
    }

    let updated = Submission::set_status(&state.db, &id, req.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    tracing::info!(
        submission_id = %id,
        status = %req.status.as_str(),
        changed_by = %auth.user_id,
        "submission status changed"
    );

    Ok(Json(updated))
}

/// Sets a submission's payment flag
///
/// # Errors
///
/// - `403 Forbidden`: caller is not a committee member
/// - `404 Not Found`: submission does not exist
pub async fn set_submission_payed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<SetPayedRequest>,
) -> ApiResult<Json<Submission>> {
    policy::require_organizer(auth.role)?;

    let updated = Submission::set_payed(&state.db, &id, req.payed)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    tracing::info!(
        submission_id = %id,
        payed = req.payed,
        changed_by = %auth.user_id,
        "submission payment flag changed"
    );

    Ok(Json(updated))
}
