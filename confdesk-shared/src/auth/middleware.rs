/// Authentication context for request handlers
///
/// The API server's auth layer validates the bearer token and inserts an
/// [`AuthContext`] into the request extensions; handlers read the
/// authenticated identity from it and never from the request body. This is
/// the accessor every ownership-scoped operation consults.

use serde::{Deserialize, Serialize};

use super::jwt::Claims;
use crate::models::user::UserRole;

/// Authentication context added to request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user's generated identifier
    pub user_id: String,

    /// Account role at token issue time
    pub role: UserRole,
}

impl AuthContext {
    /// Builds a context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            role: claims.role,
        }
    }

    /// Whether this request may perform organizer-only operations
    pub fn is_organizer(&self) -> bool {
        self.role.is_organizer()
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Invalid authorization header format
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Extracts the bearer token from an Authorization header value
///
/// # Example
///
/// ```
/// use confdesk_shared::auth::middleware::bearer_token;
///
/// assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
/// assert!(bearer_token(None).is_err());
/// assert!(bearer_token(Some("Basic dXNlcg==")).is_err());
/// ```
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;

    #[test]
    fn test_context_from_claims() {
        let claims = Claims::new(
            "USERCAFE".to_string(),
            UserRole::CommitteeMember,
            TokenType::Access,
        );

        let ctx = AuthContext::from_claims(&claims);
        assert_eq!(ctx.user_id, "USERCAFE");
        assert!(ctx.is_organizer());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer tok")).unwrap(), "tok");
        assert!(matches!(bearer_token(None), Err(AuthError::MissingCredentials)));
        assert!(matches!(bearer_token(Some("tok")), Err(AuthError::InvalidFormat(_))));
    }
}
