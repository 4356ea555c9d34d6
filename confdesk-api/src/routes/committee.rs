/// Organizing-committee membership endpoints
///
/// # Endpoints
///
/// - `GET    /v1/conferences/:id/committee` - List a conference's committee
/// - `POST   /v1/conferences/:id/committee` - Add a member (organizer only)
/// - `DELETE /v1/committee/:id` - Remove a member (organizer only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use confdesk_shared::{
    models::committee::{CommitteeMembership, CommitteeRole, CreateCommitteeMembership},
    models::conference::Conference,
    models::user::User,
    policy,
};
use serde::Deserialize;

use confdesk_shared::auth::middleware::AuthContext;

/// Add committee member request
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// User to add
    pub user_id: String,

    /// Committee role
    pub role: CommitteeRole,

    /// Day the member joins; defaults to today
    pub join_date: Option<NaiveDate>,
}

/// Lists a conference's committee, chairs first
pub async fn list_committee(
    State(state): State<AppState>,
    Path(conference_id): Path<i32>,
) -> ApiResult<Json<Vec<CommitteeMembership>>> {
    // 404 before an empty list for a conference that doesn't exist
    Conference::find_by_id(&state.db, conference_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Conference not found".to_string()))?;

    let members = CommitteeMembership::list_by_conference(&state.db, conference_id).await?;

    Ok(Json(members))
}

/// Adds a user to a conference's organizing committee
///
/// Organizer-only; the target user must exist.
pub async fn add_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(conference_id): Path<i32>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<CommitteeMembership>)> {
    policy::require_organizer(auth.role)?;

    Conference::find_by_id(&state.db, conference_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Conference not found".to_string()))?;

    User::find_by_id(&state.db, &req.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let membership = CommitteeMembership::create(
        &state.db,
        CreateCommitteeMembership {
            user_id: req.user_id,
            conference_id,
            role: req.role,
            join_date: req.join_date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// Removes a committee membership (organizer only)
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(membership_id): Path<i32>,
) -> ApiResult<StatusCode> {
    policy::require_organizer(auth.role)?;

    let deleted = CommitteeMembership::delete(&state.db, membership_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Committee membership not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
