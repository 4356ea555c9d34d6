/// Submission model and database operations
///
/// A submission ties a paper to one user and one conference. Its identifier
/// (`SUB` + 8 uppercase hex chars) is allocated once inside
/// [`Submission::create`]; the owning `user_id` and `conference_id` are
/// fixed at creation and absent from [`UpdateSubmission`], so no update can
/// move a submission to another author or conference.
///
/// Review status is a one-way workflow:
///
/// ```text
/// submitted -> under-review -> accepted
///                           -> rejected
/// ```
///
/// Authors never change status; the admin routes do, and only along the
/// workflow edges. Once a submission is accepted or rejected it is frozen
/// for author edits (see [`crate::policy::require_editable`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE submissions (
///     submission_id TEXT PRIMARY KEY,
///     title TEXT NOT NULL,
///     abstract TEXT NOT NULL,
///     keywords TEXT NOT NULL,
///     paper TEXT NOT NULL,
///     status submission_status NOT NULL DEFAULT 'submitted',
///     payed BOOLEAN NOT NULL DEFAULT FALSE,
///     submission_date DATE NOT NULL DEFAULT CURRENT_DATE,
///     user_id TEXT NOT NULL REFERENCES users ON DELETE CASCADE,
///     conference_id INTEGER NOT NULL REFERENCES conferences ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::ident::{self, IdentError, SUB_ID_HEX_LEN, SUB_ID_PREFIX};

/// Review status of a submission
///
/// Ordered only by workflow position, not by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "submission_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    /// Newly submitted, not yet picked up by reviewers
    Submitted,

    /// Being reviewed
    UnderReview,

    /// Accepted for the conference
    Accepted,

    /// Rejected
    Rejected,
}

impl SubmissionStatus {
    /// Converts status to its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under-review",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// Whether the author may still edit a submission in this status
    ///
    /// Accepted and rejected submissions are frozen for everyone.
    pub fn is_editable(&self) -> bool {
        !matches!(self, SubmissionStatus::Accepted | SubmissionStatus::Rejected)
    }

    /// Whether the review has reached a final verdict
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Accepted | SubmissionStatus::Rejected)
    }

    /// Checks if a workflow transition to `target` is valid
    pub fn can_transition_to(&self, target: SubmissionStatus) -> bool {
        match (self, target) {
            (SubmissionStatus::Submitted, SubmissionStatus::UnderReview) => true,
            (SubmissionStatus::UnderReview, SubmissionStatus::Accepted) => true,
            (SubmissionStatus::UnderReview, SubmissionStatus::Rejected) => true,

            // Verdicts are final, and the workflow never runs backwards
            _ => false,
        }
    }
}

/// Submission model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    /// Generated identifier, `SUB` + 8 uppercase hex chars, immutable
    pub submission_id: String,

    /// Paper title
    pub title: String,

    /// Paper abstract
    #[sqlx(rename = "abstract")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Comma-separated keywords
    pub keywords: String,

    /// Opaque reference to the uploaded paper file
    pub paper: String,

    /// Review status
    pub status: SubmissionStatus,

    /// Whether the author has paid the fees
    pub payed: bool,

    /// Day the paper was submitted, set once at creation
    pub submission_date: NaiveDate,

    /// Owning user, fixed at creation
    pub user_id: String,

    /// Owning conference, fixed at creation
    pub conference_id: i32,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a submission
///
/// `user_id` must come from the authenticated identity, never from the
/// request body; status always starts at `submitted`.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub paper: String,
    pub user_id: String,
    pub conference_id: i32,
}

/// Input for author-facing updates
///
/// Deliberately has no `user_id`, `conference_id`, `status`, or `payed`
/// fields: those are immutable or organizer-only, and leaving them out of
/// the type makes them unsettable by construction.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubmission {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub keywords: Option<String>,
    pub paper: Option<String>,
}

impl Submission {
    /// Creates a new submission, allocating a fresh `SUB` identifier
    ///
    /// Status starts at `submitted`, payment at false, and
    /// `submission_date` at today; none of these are caller-settable.
    pub async fn create(pool: &PgPool, data: CreateSubmission) -> Result<Self, IdentError> {
        let submission_id = ident::generate_unique(SUB_ID_PREFIX, SUB_ID_HEX_LEN, |candidate| {
            let pool = pool.clone();
            async move { Self::id_exists(&pool, &candidate).await }
        })
        .await?;

        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (submission_id, title, abstract, keywords, paper,
                                     user_id, conference_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING submission_id, title, abstract, keywords, paper, status, payed,
                      submission_date, user_id, conference_id, created_at, updated_at
            "#,
        )
        .bind(&submission_id)
        .bind(data.title)
        .bind(data.abstract_text)
        .bind(data.keywords)
        .bind(data.paper)
        .bind(data.user_id)
        .bind(data.conference_id)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            submission_id = %submission.submission_id,
            conference_id = submission.conference_id,
            "submission created"
        );
        Ok(submission)
    }

    /// Checks whether a submission identifier is already taken
    pub async fn id_exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM submissions WHERE submission_id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Finds a submission by identifier, regardless of owner
    ///
    /// For author-facing reads use [`Submission::find_by_id_for_user`] or
    /// follow up with [`crate::policy::require_owner`].
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT submission_id, title, abstract, keywords, paper, status, payed,
                   submission_date, user_id, conference_id, created_at, updated_at
            FROM submissions
            WHERE submission_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Ownership-scoped fetch: returns the submission only if `user_id`
    /// owns it
    ///
    /// A foreign submission comes back as None, indistinguishable from a
    /// missing one, so existence is never leaked.
    pub async fn find_by_id_for_user(
        pool: &PgPool,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT submission_id, title, abstract, keywords, paper, status, payed,
                   submission_date, user_id, conference_id, created_at, updated_at
            FROM submissions
            WHERE submission_id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Lists a user's own submissions, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT submission_id, title, abstract, keywords, paper, status, payed,
                   submission_date, user_id, conference_id, created_at, updated_at
            FROM submissions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Lists every submission to a conference, newest first
    pub async fn list_by_conference(
        pool: &PgPool,
        conference_id: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            SELECT submission_id, title, abstract, keywords, paper, status, payed,
                   submission_date, user_id, conference_id, created_at, updated_at
            FROM submissions
            WHERE conference_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(conference_id)
        .fetch_all(pool)
        .await
    }

    /// Updates the author-editable fields
    ///
    /// The ownership and editability checks live in the policy layer; this
    /// method writes only what [`UpdateSubmission`] can express, so
    /// `user_id` and `conference_id` stay untouched no matter what the
    /// request carried.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        data: UpdateSubmission,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET title = COALESCE($2, title),
                abstract = COALESCE($3, abstract),
                keywords = COALESCE($4, keywords),
                paper = COALESCE($5, paper),
                updated_at = NOW()
            WHERE submission_id = $1
            RETURNING submission_id, title, abstract, keywords, paper, status, payed,
                      submission_date, user_id, conference_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.abstract_text)
        .bind(data.keywords)
        .bind(data.paper)
        .fetch_optional(pool)
        .await
    }

    /// Sets the review status (organizer path)
    ///
    /// Workflow legality is checked by the caller via
    /// [`SubmissionStatus::can_transition_to`]; this just persists the new
    /// status.
    pub async fn set_status(
        pool: &PgPool,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET status = $2, updated_at = NOW()
            WHERE submission_id = $1
            RETURNING submission_id, title, abstract, keywords, paper, status, payed,
                      submission_date, user_id, conference_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    /// Sets the payment flag (organizer path)
    pub async fn set_payed(
        pool: &PgPool,
        id: &str,
        payed: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET payed = $2, updated_at = NOW()
            WHERE submission_id = $1
            RETURNING submission_id, title, abstract, keywords, paper, status, payed,
                      submission_date, user_id, conference_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(payed)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a submission
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE submission_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(SubmissionStatus::Submitted.as_str(), "submitted");
        assert_eq!(SubmissionStatus::UnderReview.as_str(), "under-review");
        assert_eq!(SubmissionStatus::Accepted.as_str(), "accepted");
        assert_eq!(SubmissionStatus::Rejected.as_str(), "rejected");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&SubmissionStatus::UnderReview).unwrap(),
            "\"under-review\""
        );
        let parsed: SubmissionStatus = serde_json::from_str("\"under-review\"").unwrap();
        assert_eq!(parsed, SubmissionStatus::UnderReview);
    }

    #[test]
    fn test_editability() {
        assert!(SubmissionStatus::Submitted.is_editable());
        assert!(SubmissionStatus::UnderReview.is_editable());
        assert!(!SubmissionStatus::Accepted.is_editable());
        assert!(!SubmissionStatus::Rejected.is_editable());
    }

    #[test]
    fn test_valid_transitions() {
        assert!(SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::UnderReview));
        assert!(SubmissionStatus::UnderReview.can_transition_to(SubmissionStatus::Accepted));
        assert!(SubmissionStatus::UnderReview.can_transition_to(SubmissionStatus::Rejected));
    }

    #[test]
    fn test_invalid_transitions() {
        // No skipping ahead
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Accepted));
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Rejected));

        // No running backwards
        assert!(!SubmissionStatus::UnderReview.can_transition_to(SubmissionStatus::Submitted));
        assert!(!SubmissionStatus::Accepted.can_transition_to(SubmissionStatus::UnderReview));

        // Verdicts are final
        assert!(!SubmissionStatus::Accepted.can_transition_to(SubmissionStatus::Rejected));
        assert!(!SubmissionStatus::Rejected.can_transition_to(SubmissionStatus::Accepted));

        // Self-transitions are not workflow edges
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Submitted));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SubmissionStatus::Submitted.is_terminal());
        assert!(!SubmissionStatus::UnderReview.is_terminal());
        assert!(SubmissionStatus::Accepted.is_terminal());
        assert!(SubmissionStatus::Rejected.is_terminal());
    }
}
