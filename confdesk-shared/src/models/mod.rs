/// Database models for Confdesk
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Registered accounts (authors and committee members)
/// - `conference`: Published conferences with themes and date ranges
/// - `submission`: Papers tied to one user and one conference
/// - `committee`: Organizing-committee memberships
///
/// # Example
///
/// ```no_run
/// use confdesk_shared::models::user::{CreateUser, User, UserRole};
/// use confdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "ali".to_string(),
///         first_name: "Ana".to_string(),
///         last_name: "Li".to_string(),
///         email: "x@tek.tn".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: UserRole::Participant,
///         affiliation: "Tek Institute".to_string(),
///         nationality: "Tunisian".to_string(),
///     },
/// )
/// .await?;
/// assert!(user.user_id.starts_with("USER"));
/// # Ok(())
/// # }
/// ```

pub mod committee;
pub mod conference;
pub mod submission;
pub mod user;
