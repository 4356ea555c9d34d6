/// Conference model and database operations
///
/// Conferences use a plain auto-incrementing key; only users and
/// submissions carry generated identifiers. The `start_date <= end_date`
/// invariant is validated before persistence by
/// [`crate::validate::conference_dates`] and re-enforced by a CHECK
/// constraint, so a write that skips validation is still rejected.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE conferences (
///     conference_id SERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     theme conference_theme NOT NULL,
///     location TEXT NOT NULL,
///     description TEXT NOT NULL CHECK (char_length(description) <= 300),
///     start_date DATE NOT NULL,
///     end_date DATE NOT NULL CHECK (start_date <= end_date),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Conference theme
///
/// The stored labels are the wire contract the UI relies on; they serialize
/// verbatim as `AI/CS`, `Science&Engineering`, and `Social Sciences`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "conference_theme")]
pub enum ConferenceTheme {
    /// Computer science and artificial intelligence
    #[sqlx(rename = "AI/CS")]
    #[serde(rename = "AI/CS")]
    AiCs,

    /// Science and engineering
    #[sqlx(rename = "Science&Engineering")]
    #[serde(rename = "Science&Engineering")]
    ScienceEngineering,

    /// Social sciences
    #[sqlx(rename = "Social Sciences")]
    #[serde(rename = "Social Sciences")]
    SocialSciences,
}

impl ConferenceTheme {
    /// Converts theme to its stored label
    pub fn as_str(&self) -> &'static str {
        match self {
            ConferenceTheme::AiCs => "AI/CS",
            ConferenceTheme::ScienceEngineering => "Science&Engineering",
            ConferenceTheme::SocialSciences => "Social Sciences",
        }
    }
}

/// Conference model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conference {
    /// Auto-incrementing primary key
    pub conference_id: i32,

    /// Conference name
    pub name: String,

    /// Theme
    pub theme: ConferenceTheme,

    /// Venue
    pub location: String,

    /// Description, at most 300 characters
    pub description: String,

    /// First day of the conference
    pub start_date: NaiveDate,

    /// Last day of the conference (inclusive, may equal `start_date`)
    pub end_date: NaiveDate,

    /// When the conference was created
    pub created_at: DateTime<Utc>,

    /// When the conference was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a conference
#[derive(Debug, Clone)]
pub struct CreateConference {
    pub name: String,
    pub theme: ConferenceTheme,
    pub location: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Input for updating a conference; only non-None fields are written
#[derive(Debug, Clone, Default)]
pub struct UpdateConference {
    pub name: Option<String>,
    pub theme: Option<ConferenceTheme>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Conference {
    /// Creates a new conference
    ///
    /// Callers must have validated date ordering and description length;
    /// the CHECK constraints reject anything that slipped through.
    pub async fn create(pool: &PgPool, data: CreateConference) -> Result<Self, sqlx::Error> {
        let conference = sqlx::query_as::<_, Conference>(
            r#"
            INSERT INTO conferences (name, theme, location, description, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING conference_id, name, theme, location, description,
                      start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.theme)
        .bind(data.location)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(pool)
        .await?;

        tracing::info!(conference_id = conference.conference_id, "conference created");
        Ok(conference)
    }

    /// Finds a conference by primary key
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Conference>(
            r#"
            SELECT conference_id, name, theme, location, description,
                   start_date, end_date, created_at, updated_at
            FROM conferences
            WHERE conference_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists conferences ordered by start date
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Conference>(
            r#"
            SELECT conference_id, name, theme, location, description,
                   start_date, end_date, created_at, updated_at
            FROM conferences
            ORDER BY start_date
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Updates a conference
    ///
    /// Returns the updated conference, or None if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        data: UpdateConference,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Conference>(
            r#"
            UPDATE conferences
            SET name = COALESCE($2, name),
                theme = COALESCE($3, theme),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                updated_at = NOW()
            WHERE conference_id = $1
            RETURNING conference_id, name, theme, location, description,
                      start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.theme)
        .bind(data.location)
        .bind(data.description)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a conference; submissions and memberships cascade with it
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM conferences WHERE conference_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Length of the conference in days, inclusive of both endpoints' gap
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_labels() {
        assert_eq!(ConferenceTheme::AiCs.as_str(), "AI/CS");
        assert_eq!(ConferenceTheme::ScienceEngineering.as_str(), "Science&Engineering");
        assert_eq!(ConferenceTheme::SocialSciences.as_str(), "Social Sciences");
    }

    #[test]
    fn test_theme_serialization_round_trip() {
        let json = serde_json::to_string(&ConferenceTheme::AiCs).unwrap();
        assert_eq!(json, "\"AI/CS\"");

        let parsed: ConferenceTheme = serde_json::from_str("\"Science&Engineering\"").unwrap();
        assert_eq!(parsed, ConferenceTheme::ScienceEngineering);
    }

    #[test]
    fn test_duration_days() {
        let conference = Conference {
            conference_id: 1,
            name: "Test".to_string(),
            theme: ConferenceTheme::AiCs,
            location: "Tunis".to_string(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(conference.duration_days(), 5);
    }
}
