/// Submission endpoints, all ownership-scoped
///
/// # Endpoints
///
/// - `GET  /v1/submissions` - List the authenticated user's submissions
/// - `POST /v1/submissions` - Create a submission for the authenticated user
/// - `GET  /v1/submissions/:id` - Detail, own submissions only
/// - `PUT  /v1/submissions/:id` - Update, own and still-editable only
///
/// The owning user always comes from the [`AuthContext`]; nothing in a
/// request body can attach a submission to someone else or move it later.
/// A foreign submission identifier produces the same 404 as a missing one.

use crate::{
    app::AppState,
    error::{request_validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use confdesk_shared::{
    auth::middleware::AuthContext,
    models::conference::Conference,
    models::submission::{CreateSubmission, Submission, UpdateSubmission},
    policy,
};
use serde::Deserialize;
use validator::Validate;

/// Create submission request
///
/// Deliberately has no `user_id` or `status` field; the owner is the
/// authenticated user and every submission starts at `submitted`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    /// Target conference
    pub conference_id: i32,

    /// Paper title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Paper abstract
    #[serde(rename = "abstract")]
    #[validate(length(min = 1, message = "Abstract must not be empty"))]
    pub abstract_text: String,

    /// Comma-separated keywords
    #[validate(length(min = 1, message = "Keywords must not be empty"))]
    pub keywords: String,

    /// Opaque reference to the uploaded paper file
    #[validate(length(min = 1, message = "Paper reference must not be empty"))]
    pub paper: String,
}

/// Update submission request; omitted fields are left unchanged
///
/// Unknown fields (`user_id`, `conference_id`, `status`, `payed`) are
/// rejected outright rather than silently dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSubmissionRequest {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub keywords: Option<String>,
    pub paper: Option<String>,
}

/// Lists the authenticated user's submissions, newest first
///
/// Scoping happens in SQL; other users' submissions are never fetched.
pub async fn list_submissions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Submission>>> {
    let submissions = Submission::list_by_user(&state.db, &auth.user_id).await?;

    Ok(Json(submissions))
}

/// Creates a submission owned by the authenticated user
///
/// # Errors
///
/// - `404 Not Found`: target conference does not exist
/// - `422 Unprocessable Entity`: empty title/abstract/keywords/paper
pub async fn create_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateSubmissionRequest>,
) -> ApiResult<(StatusCode, Json<Submission>)> {
    req.validate().map_err(request_validation_error)?;

    Conference::find_by_id(&state.db, req.conference_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Conference not found".to_string()))?;

    let submission = Submission::create(
        &state.db,
        CreateSubmission {
            title: req.title,
            abstract_text: req.abstract_text,
            keywords: req.keywords,
            paper: req.paper,
            user_id: auth.user_id,
            conference_id: req.conference_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// Submission detail, own submissions only
pub async fn get_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Submission>> {
    let submission = Submission::find_by_id_for_user(&state.db, &id, &auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    Ok(Json(submission))
}

/// Updates a submission
///
/// Gated by the full author-update policy: ownership first (a foreign
/// submission is a 404), then editability (accepted and rejected
/// submissions are frozen, 403). The model's update path can only touch
/// title, abstract, keywords, and paper.
pub async fn update_submission(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSubmissionRequest>,
) -> ApiResult<Json<Submission>> {
    let submission = Submission::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    policy::authorize_author_update(&auth.user_id, &submission)?;

    let updated = Submission::update(
        &state.db,
        &id,
        UpdateSubmission {
            title: req.title,
            abstract_text: req.abstract_text,
            keywords: req.keywords,
            paper: req.paper,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    Ok(Json(updated))
}
