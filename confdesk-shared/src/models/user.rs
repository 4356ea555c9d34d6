/// User model and database operations
///
/// Accounts are keyed by a generated human-readable identifier in the
/// format `USER` + 4 uppercase hex chars. The identifier is allocated once
/// inside [`User::create`] and never regenerated; no update path touches it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id TEXT PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     first_name TEXT NOT NULL,
///     last_name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     role user_role NOT NULL DEFAULT 'participant',
///     affiliation TEXT NOT NULL,
///     nationality TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::ident::{self, IdentError, USER_ID_HEX_LEN, USER_ID_PREFIX};

/// Account role
///
/// Participants submit papers; organizing committee members additionally
/// drive review-status and payment changes through the admin routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Regular author account
    Participant,

    /// Organizing committee member
    CommitteeMember,
}

impl UserRole {
    /// Converts role to its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Participant => "participant",
            UserRole::CommitteeMember => "committee-member",
        }
    }

    /// Whether this role may perform organizer-only operations
    pub fn is_organizer(&self) -> bool {
        matches!(self, UserRole::CommitteeMember)
    }
}

/// User model representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Generated identifier, `USER` + 4 uppercase hex chars
    ///
    /// Assigned exactly once at first persistence, immutable thereafter
    pub user_id: String,

    /// Login name, unique across all accounts
    pub username: String,

    /// Given name (letters, spaces, hyphens only)
    pub first_name: String,

    /// Family name (letters, spaces, hyphens only)
    pub last_name: String,

    /// Email address, unique, domain restricted to the allow-list
    pub email: String,

    /// Argon2id password hash, never plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Account role
    pub role: UserRole,

    /// University or organization
    pub affiliation: String,

    /// Nationality
    pub nationality: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// The caller is expected to have run the domain validators (name charset,
/// email domain) and hashed the password before reaching this point.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub affiliation: String,
    pub nationality: String,
}

/// Input for updating an existing user's profile
///
/// Only non-None fields are written. `user_id`, `username`, and `role`
/// are not updatable through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub affiliation: Option<String>,
    pub nationality: Option<String>,
}

impl User {
    /// Creates a new user, allocating a fresh `USER` identifier
    ///
    /// Identifier collisions against existing rows are retried internally;
    /// the unique constraint on `user_id` is the backstop should two
    /// concurrent requests draw the same candidate.
    ///
    /// # Errors
    ///
    /// - [`IdentError::Exhausted`] if no free identifier was found
    /// - [`IdentError::Database`] for constraint violations (duplicate
    ///   email or username) and connection failures
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, IdentError> {
        let user_id = ident::generate_unique(USER_ID_PREFIX, USER_ID_HEX_LEN, |candidate| {
            let pool = pool.clone();
            async move { Self::id_exists(&pool, &candidate).await }
        })
        .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, username, first_name, last_name, email,
                               password_hash, role, affiliation, nationality)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING user_id, username, first_name, last_name, email, password_hash,
                      role, affiliation, nationality, created_at, updated_at
            "#,
        )
        .bind(&user_id)
        .bind(data.username)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .bind(data.affiliation)
        .bind(data.nationality)
        .fetch_one(pool)
        .await?;

        tracing::info!(user_id = %user.user_id, "user created");
        Ok(user)
    }

    /// Checks whether a user identifier is already taken
    pub async fn id_exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Finds a user by identifier
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, first_name, last_name, email, password_hash,
                   role, affiliation, nationality, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, first_name, last_name, email, password_hash,
                   role, affiliation, nationality, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, first_name, last_name, email, password_hash,
                   role, affiliation, nationality, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Updates profile fields; the identifier is never touched
    ///
    /// Returns the updated user, or None if the user does not exist.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                affiliation = COALESCE($4, affiliation),
                nationality = COALESCE($5, nationality),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, username, first_name, last_name, email, password_hash,
                      role, affiliation, nationality, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.affiliation)
        .bind(data.nationality)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a user; submissions and memberships cascade with it
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists users ordered by creation time
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, first_name, last_name, email, password_hash,
                   role, affiliation, nationality, created_at, updated_at
            FROM users
            ORDER BY created_at
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(UserRole::Participant.as_str(), "participant");
        assert_eq!(UserRole::CommitteeMember.as_str(), "committee-member");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Participant).unwrap(), "\"participant\"");
        assert_eq!(
            serde_json::to_string(&UserRole::CommitteeMember).unwrap(),
            "\"committee-member\""
        );
    }

    #[test]
    fn test_is_organizer() {
        assert!(!UserRole::Participant.is_organizer());
        assert!(UserRole::CommitteeMember.is_organizer());
    }
}
