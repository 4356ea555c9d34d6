/// Human-readable identifier generation
///
/// Users and submissions carry short random identifiers instead of raw
/// database keys: `USER` + 4 uppercase hex chars for users, `SUB` + 8
/// uppercase hex chars for submissions. Generation is pure; the caller
/// supplies the existence check that drives collision retry.
///
/// Retries are bounded. The 4-hex-char user space holds only 65536 values,
/// so a saturated table could otherwise spin forever; after
/// [`MAX_ATTEMPTS`] failed draws the allocation surfaces as
/// [`IdentError::Exhausted`]. The primary-key constraint in the database
/// remains the real guard against the check-then-insert race between
/// concurrent requests.
///
/// # Example
///
/// ```
/// use confdesk_shared::ident::{generate_id, USER_ID_PREFIX, USER_ID_HEX_LEN};
///
/// let id = generate_id(USER_ID_PREFIX, USER_ID_HEX_LEN);
/// assert!(id.starts_with("USER"));
/// assert_eq!(id.len(), 8);
/// ```

use std::future::Future;
use uuid::Uuid;

/// Prefix for user identifiers
pub const USER_ID_PREFIX: &str = "USER";

/// Number of hex characters after the user prefix
pub const USER_ID_HEX_LEN: usize = 4;

/// Prefix for submission identifiers
pub const SUB_ID_PREFIX: &str = "SUB";

/// Number of hex characters after the submission prefix
pub const SUB_ID_HEX_LEN: usize = 8;

/// Maximum generation attempts before giving up on an allocation
pub const MAX_ATTEMPTS: u32 = 64;

/// Error type for identifier allocation
#[derive(Debug, thiserror::Error)]
pub enum IdentError {
    /// No free identifier found within the attempt budget
    #[error("no free {prefix} identifier after {attempts} attempts")]
    Exhausted { prefix: String, attempts: u32 },

    /// Existence check failed
    #[error("identifier lookup failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Generates a candidate identifier: `prefix` + `hex_len` uppercase hex chars
///
/// Hex digits are drawn from a fresh UUIDv4, so candidates are uniformly
/// random but carry no cryptographic guarantee. Uniqueness is the caller's
/// concern; see [`generate_unique`].
pub fn generate_id(prefix: &str, hex_len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, hex[..hex_len].to_uppercase())
}

/// Allocates an identifier that passes the supplied existence check
///
/// Draws candidates with [`generate_id`] and asks `is_taken` about each one
/// until it reports a free identifier. Collisions are recovered here and
/// never surfaced to the caller; only attempt exhaustion or a failing
/// lookup is.
///
/// # Arguments
///
/// * `prefix` - Identifier prefix (e.g. `"USER"`)
/// * `hex_len` - Number of hex characters after the prefix
/// * `is_taken` - Async check returning whether a candidate already exists
///
/// # Errors
///
/// - [`IdentError::Exhausted`] after [`MAX_ATTEMPTS`] collisions
/// - [`IdentError::Database`] if the existence check itself fails
///
/// # Example
///
/// ```no_run
/// use confdesk_shared::ident::{generate_unique, SUB_ID_PREFIX, SUB_ID_HEX_LEN};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let id = generate_unique(SUB_ID_PREFIX, SUB_ID_HEX_LEN, |candidate| {
///     let pool = pool.clone();
///     async move {
///         let (exists,): (bool,) =
///             sqlx::query_as("SELECT EXISTS(SELECT 1 FROM submissions WHERE submission_id = $1)")
///                 .bind(candidate)
///                 .fetch_one(&pool)
///                 .await?;
///         Ok(exists)
///     }
/// })
/// .await?;
/// assert!(id.starts_with("SUB"));
/// # Ok(())
/// # }
/// ```
pub async fn generate_unique<F, Fut>(
    prefix: &str,
    hex_len: usize,
    is_taken: F,
) -> Result<String, IdentError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<bool, sqlx::Error>>,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let candidate = generate_id(prefix, hex_len);

        if !is_taken(candidate.clone()).await? {
            if attempt > 1 {
                tracing::debug!(prefix, attempt, "identifier allocated after collision retry");
            }
            return Ok(candidate);
        }
    }

    tracing::warn!(prefix, attempts = MAX_ATTEMPTS, "identifier space exhausted");
    Err(IdentError::Exhausted {
        prefix: prefix.to_string(),
        attempts: MAX_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[test]
    fn test_user_id_format() {
        for _ in 0..100 {
            let id = generate_id(USER_ID_PREFIX, USER_ID_HEX_LEN);
            assert!(id.starts_with("USER"));
            assert_eq!(id.len(), 8);
            assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_submission_id_format() {
        for _ in 0..100 {
            let id = generate_id(SUB_ID_PREFIX, SUB_ID_HEX_LEN);
            assert!(id.starts_with("SUB"));
            assert_eq!(id.len(), 11);
            assert!(id[3..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        }
    }

    #[tokio::test]
    async fn test_generate_unique_skips_taken_ids() {
        // Report the first three draws as collisions and remember them;
        // the returned identifier must not be one of the rejects.
        let calls = RefCell::new(0u32);
        let rejected: RefCell<HashSet<String>> = RefCell::new(HashSet::new());

        let id = generate_unique(SUB_ID_PREFIX, SUB_ID_HEX_LEN, |candidate| {
            *calls.borrow_mut() += 1;
            let taken = *calls.borrow() <= 3;
            if taken {
                rejected.borrow_mut().insert(candidate);
            }
            async move { Ok(taken) }
        })
        .await
        .expect("allocation should succeed after retries");

        assert_eq!(*calls.borrow(), 4, "three collisions should force three retries");
        assert!(!rejected.borrow().contains(&id));
        assert!(id.starts_with("SUB"));
    }

    #[tokio::test]
    async fn test_generate_unique_never_returns_existing_id() {
        // Simulated store pre-populated by earlier allocations: every
        // allocated identifier goes into the set, and no later allocation
        // may collide with it.
        let store: RefCell<HashSet<String>> = RefCell::new(HashSet::new());

        for _ in 0..200 {
            let id = generate_unique(USER_ID_PREFIX, USER_ID_HEX_LEN, |candidate| {
                let taken = store.borrow().contains(&candidate);
                async move { Ok(taken) }
            })
            .await
            .expect("allocation should succeed");

            assert!(store.borrow_mut().insert(id), "allocator returned a stored identifier");
        }

        assert_eq!(store.borrow().len(), 200);
    }

    #[tokio::test]
    async fn test_generate_unique_exhaustion() {
        let result = generate_unique(USER_ID_PREFIX, USER_ID_HEX_LEN, |_| async { Ok(true) }).await;

        match result {
            Err(IdentError::Exhausted { prefix, attempts }) => {
                assert_eq!(prefix, "USER");
                assert_eq!(attempts, MAX_ATTEMPTS);
            }
            other => panic!("expected exhaustion, got {:?}", other.map(|_| ())),
        }
    }
}
