/// Conference CRUD endpoints
///
/// # Endpoints
///
/// - `GET    /v1/conferences` - List conferences (public)
/// - `GET    /v1/conferences/:id` - Conference detail (public)
/// - `POST   /v1/conferences` - Create conference (authenticated)
/// - `PUT    /v1/conferences/:id` - Update conference (authenticated)
/// - `DELETE /v1/conferences/:id` - Delete conference (authenticated)
///
/// Date ordering and description length are validated here, before
/// persistence; the database CHECK constraints catch anything that goes
/// around this path.

use crate::{
    app::AppState,
    error::{request_validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use confdesk_shared::{
    models::conference::{Conference, ConferenceTheme, CreateConference, UpdateConference},
    validate,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Maximum rows to return (default 50)
    pub limit: Option<i64>,

    /// Rows to skip (default 0)
    pub offset: Option<i64>,
}

/// Create conference request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConferenceRequest {
    /// Conference name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Theme (`AI/CS`, `Science&Engineering`, or `Social Sciences`)
    pub theme: ConferenceTheme,

    /// Venue
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    /// Description, at most 300 characters
    pub description: String,

    /// First day
    pub start_date: NaiveDate,

    /// Last day, on or after `start_date`
    pub end_date: NaiveDate,
}

/// Update conference request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateConferenceRequest {
    pub name: Option<String>,
    pub theme: Option<ConferenceTheme>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Conference response with the computed duration
#[derive(Debug, Serialize)]
pub struct ConferenceResponse {
    #[serde(flatten)]
    pub conference: Conference,

    /// Length of the conference in days
    pub duration_days: i64,
}

impl From<Conference> for ConferenceResponse {
    fn from(conference: Conference) -> Self {
        let duration_days = conference.duration_days();
        Self {
            conference,
            duration_days,
        }
    }
}

/// Lists conferences ordered by start date
pub async fn list_conferences(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<ConferenceResponse>>> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let conferences = Conference::list(&state.db, limit, offset).await?;

    Ok(Json(conferences.into_iter().map(ConferenceResponse::from).collect()))
}

/// Conference detail
pub async fn get_conference(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ConferenceResponse>> {
    let conference = Conference::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Conference not found".to_string()))?;

    Ok(Json(conference.into()))
}

/// Creates a conference
///
/// # Errors
///
/// - `422 Unprocessable Entity`: `start_date > end_date` or description
///   over 300 characters
pub async fn create_conference(
    State(state): State<AppState>,
    Json(req): Json<CreateConferenceRequest>,
) -> ApiResult<(StatusCode, Json<ConferenceResponse>)> {
    req.validate().map_err(request_validation_error)?;

    validate::conference_dates(req.start_date, req.end_date)?;
    validate::description_length(&req.description)?;

    let conference = Conference::create(
        &state.db,
        CreateConference {
            name: req.name,
            theme: req.theme,
            location: req.location,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(conference.into())))
}

/// Updates a conference
///
/// Date validation runs against the dates the row will end up with, so a
/// request changing only `end_date` cannot invert the range.
pub async fn update_conference(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateConferenceRequest>,
) -> ApiResult<Json<ConferenceResponse>> {
    let existing = Conference::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Conference not found".to_string()))?;

    let start = req.start_date.unwrap_or(existing.start_date);
    let end = req.end_date.unwrap_or(existing.end_date);
    validate::conference_dates(start, end)?;

    if let Some(ref description) = req.description {
        validate::description_length(description)?;
    }

    let conference = Conference::update(
        &state.db,
        id,
        UpdateConference {
            name: req.name,
            theme: req.theme,
            location: req.location,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Conference not found".to_string()))?;

    Ok(Json(conference.into()))
}

/// Deletes a conference; its submissions and committee cascade with it
pub async fn delete_conference(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let deleted = Conference::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Conference not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
