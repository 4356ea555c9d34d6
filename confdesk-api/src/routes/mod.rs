/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, refresh)
/// - `conferences`: Conference CRUD
/// - `committee`: Organizing-committee membership management
/// - `submissions`: Ownership-scoped submission CRUD
/// - `admin`: Organizer-only status and payment operations

pub mod admin;
pub mod auth;
pub mod committee;
pub mod conferences;
pub mod health;
pub mod submissions;
