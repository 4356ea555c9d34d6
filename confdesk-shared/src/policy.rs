/// Access policy for submissions
///
/// Two independent rules gate author-facing submission access:
///
/// 1. **Ownership scoping** — a non-privileged user may only list, view, or
///    update their own submissions. A foreign submission is reported as
///    *not found*, never as forbidden, so requests cannot probe for the
///    existence of other users' records. This is applied consistently:
///    SQL-scoped queries return no row, and [`require_owner`] maps an
///    owner mismatch to [`AccessError::NotFound`].
/// 2. **Editability** — once an organizer sets a submission to `accepted`
///    or `rejected` it is frozen; updates fail with a Forbidden-kind error
///    regardless of who is asking.
///
/// Status changes themselves are organizer-only ([`require_organizer`])
/// and follow the one-way workflow encoded in
/// [`SubmissionStatus::can_transition_to`].
///
/// # Example
///
/// ```
/// use confdesk_shared::policy::{authorize_author_update, AccessError};
/// # use confdesk_shared::models::submission::{Submission, SubmissionStatus};
/// # fn check(own: &Submission, foreign: &Submission) {
/// assert!(authorize_author_update("USER1A2B", own).is_ok());
/// assert!(matches!(
///     authorize_author_update("USER1A2B", foreign),
///     Err(AccessError::NotFound)
/// ));
/// # }
/// ```

use crate::models::submission::{Submission, SubmissionStatus};
use crate::models::user::UserRole;

/// Error type for access-policy denials
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The record does not exist for this user
    ///
    /// Also returned for records owned by someone else, so existence is
    /// never leaked.
    #[error("submission not found")]
    NotFound,

    /// The submission has a final verdict and can no longer be modified
    #[error("submission can no longer be modified")]
    Frozen,

    /// The operation requires an organizing committee member
    #[error("operation requires an organizing committee member")]
    OrganizerOnly,
}

/// Requires that `user_id` owns the submission
///
/// An owner mismatch is a [`AccessError::NotFound`], matching what an
/// SQL-scoped lookup would have returned.
pub fn require_owner(user_id: &str, submission: &Submission) -> Result<(), AccessError> {
    if submission.user_id != user_id {
        return Err(AccessError::NotFound);
    }

    Ok(())
}

/// Requires that a submission in this status is still author-editable
///
/// Fails with [`AccessError::Frozen`] for `accepted` and `rejected`,
/// regardless of the actor.
pub fn require_editable(status: SubmissionStatus) -> Result<(), AccessError> {
    if !status.is_editable() {
        return Err(AccessError::Frozen);
    }

    Ok(())
}

/// Requires an organizing committee member
pub fn require_organizer(role: UserRole) -> Result<(), AccessError> {
    if !role.is_organizer() {
        return Err(AccessError::OrganizerOnly);
    }

    Ok(())
}

/// Full author-update gate: ownership first, then editability
///
/// Ownership is checked before editability so a non-owner probing a frozen
/// submission still sees plain not-found.
pub fn authorize_author_update(user_id: &str, submission: &Submission) -> Result<(), AccessError> {
    require_owner(user_id, submission)?;
    require_editable(submission.status)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn submission(owner: &str, status: SubmissionStatus) -> Submission {
        Submission {
            submission_id: "SUB12EF78A2".to_string(),
            title: "A Paper".to_string(),
            abstract_text: "About things.".to_string(),
            keywords: "things".to_string(),
            paper: "papers/a-paper.pdf".to_string(),
            status,
            payed: false,
            submission_date: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
            user_id: owner.to_string(),
            conference_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_may_access_own_submission() {
        let sub = submission("USER1A2B", SubmissionStatus::Submitted);
        assert!(require_owner("USER1A2B", &sub).is_ok());
    }

    #[test]
    fn test_foreign_submission_reports_not_found() {
        // Denial must not reveal that the record exists
        let sub = submission("USERB00F", SubmissionStatus::Submitted);
        assert_eq!(require_owner("USER1A2B", &sub), Err(AccessError::NotFound));
    }

    #[test]
    fn test_frozen_statuses_reject_updates() {
        assert_eq!(require_editable(SubmissionStatus::Accepted), Err(AccessError::Frozen));
        assert_eq!(require_editable(SubmissionStatus::Rejected), Err(AccessError::Frozen));
        assert!(require_editable(SubmissionStatus::Submitted).is_ok());
        assert!(require_editable(SubmissionStatus::UnderReview).is_ok());
    }

    #[test]
    fn test_frozen_rejects_even_the_owner() {
        let sub = submission("USER1A2B", SubmissionStatus::Rejected);
        assert_eq!(authorize_author_update("USER1A2B", &sub), Err(AccessError::Frozen));
    }

    #[test]
    fn test_author_update_happy_path() {
        let sub = submission("USER1A2B", SubmissionStatus::Submitted);
        assert!(authorize_author_update("USER1A2B", &sub).is_ok());
    }

    #[test]
    fn test_non_owner_of_frozen_submission_sees_not_found() {
        // Ownership is checked first; a probing non-owner learns nothing
        let sub = submission("USERB00F", SubmissionStatus::Accepted);
        assert_eq!(authorize_author_update("USER1A2B", &sub), Err(AccessError::NotFound));
    }

    #[test]
    fn test_require_organizer() {
        assert!(require_organizer(UserRole::CommitteeMember).is_ok());
        assert_eq!(require_organizer(UserRole::Participant), Err(AccessError::OrganizerOnly));
    }
}
