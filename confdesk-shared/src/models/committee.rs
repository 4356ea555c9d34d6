/// Organizing-committee memberships
///
/// Links a user to a conference with a committee role and a join date.
/// Membership rows cascade with both parents.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE committee_memberships (
///     membership_id SERIAL PRIMARY KEY,
///     user_id TEXT NOT NULL REFERENCES users ON DELETE CASCADE,
///     conference_id INTEGER NOT NULL REFERENCES conferences ON DELETE CASCADE,
///     role committee_role NOT NULL,
///     join_date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (user_id, conference_id)
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Role inside a conference's organizing committee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "committee_role", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CommitteeRole {
    Chair,
    CoChair,
    Member,
}

impl CommitteeRole {
    /// Converts role to its stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitteeRole::Chair => "chair",
            CommitteeRole::CoChair => "co-chair",
            CommitteeRole::Member => "member",
        }
    }
}

/// Committee membership model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommitteeMembership {
    /// Auto-incrementing primary key
    pub membership_id: i32,

    /// Member's user identifier
    pub user_id: String,

    /// Conference being organized
    pub conference_id: i32,

    /// Role on the committee
    pub role: CommitteeRole,

    /// Day the member joined the committee
    pub join_date: NaiveDate,

    /// When the row was created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a committee membership
#[derive(Debug, Clone)]
pub struct CreateCommitteeMembership {
    pub user_id: String,
    pub conference_id: i32,
    pub role: CommitteeRole,
    pub join_date: NaiveDate,
}

impl CommitteeMembership {
    /// Adds a user to a conference's organizing committee
    pub async fn create(
        pool: &PgPool,
        data: CreateCommitteeMembership,
    ) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, CommitteeMembership>(
            r#"
            INSERT INTO committee_memberships (user_id, conference_id, role, join_date)
            VALUES ($1, $2, $3, $4)
            RETURNING membership_id, user_id, conference_id, role, join_date,
                      created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.conference_id)
        .bind(data.role)
        .bind(data.join_date)
        .fetch_one(pool)
        .await?;

        tracing::info!(
            membership_id = membership.membership_id,
            conference_id = membership.conference_id,
            "committee membership created"
        );
        Ok(membership)
    }

    /// Lists a conference's committee, chairs first
    pub async fn list_by_conference(
        pool: &PgPool,
        conference_id: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CommitteeMembership>(
            r#"
            SELECT membership_id, user_id, conference_id, role, join_date,
                   created_at, updated_at
            FROM committee_memberships
            WHERE conference_id = $1
            ORDER BY role, join_date
            "#,
        )
        .bind(conference_id)
        .fetch_all(pool)
        .await
    }

    /// Lists the committees a user sits on
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, CommitteeMembership>(
            r#"
            SELECT membership_id, user_id, conference_id, role, join_date,
                   created_at, updated_at
            FROM committee_memberships
            WHERE user_id = $1
            ORDER BY join_date
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Removes a committee membership
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM committee_memberships WHERE membership_id = $1")
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
    fn test_committee_role_as_str() {
        assert_eq!(CommitteeRole::Chair.as_str(), "chair");
        assert_eq!(CommitteeRole::CoChair.as_str(), "co-chair");
        assert_eq!(CommitteeRole::Member.as_str(), "member");
    }

    #[test]
    fn test_committee_role_serialization() {
        assert_eq!(serde_json::to_string(&CommitteeRole::CoChair).unwrap(), "\"co-chair\"");
        let parsed: CommitteeRole = serde_json::from_str("\"co-chair\"").unwrap();
        assert_eq!(parsed, CommitteeRole::CoChair);
    }
}
