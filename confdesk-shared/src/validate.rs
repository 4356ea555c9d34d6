/// Domain validators
///
/// Business-rule validation shared by every write path. Handlers invoke
/// these explicitly before persistence; the database re-checks what it can
/// (CHECK and UNIQUE constraints) so a write that skips validation still
/// cannot corrupt an invariant.
///
/// # Example
///
/// ```
/// use confdesk_shared::validate;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
/// assert!(validate::conference_dates(start, end).is_ok());
/// assert!(validate::conference_dates(end, start).is_err());
/// ```

use chrono::NaiveDate;

/// Email domains accepted for registration when no configuration is given
pub const DEFAULT_ALLOWED_DOMAINS: [&str; 4] = ["esprit.tn", "seasame.com", "tek.tn", "central.net"];

/// Maximum length of a conference description
pub const DESCRIPTION_MAX_CHARS: usize = 300;

/// Error type for domain validation
///
/// Every variant is recoverable and maps to a field-level message on the
/// API surface. Malformed input (an email with no `@`) is an ordinary
/// variant here, never a panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Conference start date falls after its end date
    #[error("start date must be on or before end date")]
    DateRange,

    /// Email has no domain part to check
    #[error("email address is malformed")]
    InvalidEmail,

    /// Email domain is not on the allow-list
    #[error("email domain {0} is not an accepted domain")]
    EmailDomainNotAllowed(String),

    /// Name field contains a character outside letters, spaces, and hyphens
    #[error("{field} may only contain letters, spaces and hyphens")]
    InvalidName { field: &'static str },

    /// Description exceeds the maximum length
    #[error("description exceeds {max} characters (got {len})")]
    DescriptionTooLong { len: usize, max: usize },

    /// Password confirmation does not match
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// The request field this error should be attached to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::DateRange => "start_date",
            ValidationError::InvalidEmail | ValidationError::EmailDomainNotAllowed(_) => "email",
            ValidationError::InvalidName { field } => field,
            ValidationError::DescriptionTooLong { .. } => "description",
            ValidationError::PasswordMismatch => "password_confirm",
        }
    }
}

/// Validates conference date ordering
///
/// Fails iff `start > end`; a single-day conference (`start == end`) is
/// accepted.
pub fn conference_dates(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::DateRange);
    }

    Ok(())
}

/// Validates an email address against a domain allow-list
///
/// The part after the last `@` must be a member of `allowed`. An address
/// with no `@`, or with an empty domain, fails with
/// [`ValidationError::InvalidEmail`].
pub fn email_domain(email: &str, allowed: &[String]) -> Result<(), ValidationError> {
    let domain = match email.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() => domain,
        _ => return Err(ValidationError::InvalidEmail),
    };

    if !allowed.iter().any(|d| d == domain) {
        return Err(ValidationError::EmailDomainNotAllowed(domain.to_string()));
    }

    Ok(())
}

/// Validates a name field
///
/// Accepts ASCII letters, spaces, and hyphens only. Apostrophes are
/// rejected, so "O'Brien" fails; the charset is deliberately strict.
pub fn name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-') {
        Ok(())
    } else {
        Err(ValidationError::InvalidName { field })
    }
}

/// Validates a conference description length
pub fn description_length(text: &str) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong {
            len,
            max: DESCRIPTION_MAX_CHARS,
        });
    }

    Ok(())
}

/// Validates that a password and its confirmation match
pub fn passwords_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_conference_dates_ordering() {
        assert!(conference_dates(date(2026, 1, 5), date(2026, 1, 10)).is_ok());
        assert_eq!(
            conference_dates(date(2026, 1, 10), date(2026, 1, 5)),
            Err(ValidationError::DateRange)
        );
    }

    #[test]
    fn test_conference_dates_equal_accepted() {
        assert!(conference_dates(date(2026, 3, 1), date(2026, 3, 1)).is_ok());
    }

    #[test]
    fn test_email_domain_allowed() {
        assert!(email_domain("a@esprit.tn", &allowed()).is_ok());
        assert!(email_domain("x@tek.tn", &allowed()).is_ok());
    }

    #[test]
    fn test_email_domain_rejected() {
        assert_eq!(
            email_domain("a@evil.com", &allowed()),
            Err(ValidationError::EmailDomainNotAllowed("evil.com".to_string()))
        );
    }

    #[test]
    fn test_email_without_at_is_validation_error() {
        // Malformed input must be a typed failure, not a panic
        assert_eq!(email_domain("not-an-email", &allowed()), Err(ValidationError::InvalidEmail));
        assert_eq!(email_domain("trailing@", &allowed()), Err(ValidationError::InvalidEmail));
        assert_eq!(email_domain("", &allowed()), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_name_charset() {
        assert!(name("first_name", "Jean-Paul").is_ok());
        assert!(name("first_name", "Ana Li").is_ok());
        assert_eq!(
            name("first_name", "J3an"),
            Err(ValidationError::InvalidName { field: "first_name" })
        );
        // Apostrophe is not on the allow-list
        assert_eq!(
            name("last_name", "O'Brien"),
            Err(ValidationError::InvalidName { field: "last_name" })
        );
    }

    #[test]
    fn test_description_length() {
        assert!(description_length(&"a".repeat(300)).is_ok());
        assert_eq!(
            description_length(&"a".repeat(301)),
            Err(ValidationError::DescriptionTooLong { len: 301, max: 300 })
        );
    }

    #[test]
    fn test_passwords_match() {
        assert!(passwords_match("s3cret!A", "s3cret!A").is_ok());
        assert_eq!(
            passwords_match("s3cret!A", "s3cret!B"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(ValidationError::DateRange.field(), "start_date");
        assert_eq!(ValidationError::InvalidEmail.field(), "email");
        assert_eq!(ValidationError::PasswordMismatch.field(), "password_confirm");
    }
}
