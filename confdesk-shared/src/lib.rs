//! # Confdesk Shared Library
//!
//! This crate contains the domain types, validators, and business rules used
//! by the Confdesk API server: organizers publish conferences, authors submit
//! papers, staff track review status and payment.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `ident`: Human-readable identifier generation with collision retry
//! - `validate`: Domain validators (dates, email domains, names, lengths)
//! - `policy`: Ownership scoping and submission-editability rules
//! - `auth`: Password hashing, JWT tokens, and the request auth context
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod ident;
pub mod models;
pub mod policy;
pub mod validate;

/// Current version of the Confdesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
