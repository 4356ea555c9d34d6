/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT access/refresh token generation and validation
/// - [`middleware`]: The per-request [`middleware::AuthContext`] the access
///   policy consults
///
/// Session mechanics (cookies, CSRF) are out of scope; requests carry a
/// bearer token and every scoped operation reads the authenticated identity
/// from the request extensions.
///
/// # Example
///
/// ```
/// use confdesk_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
