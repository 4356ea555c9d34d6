/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use confdesk_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = confdesk_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use confdesk_shared::auth::{jwt, middleware::AuthContext};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the registration email-domain allow-list
    pub fn allowed_domains(&self) -> &[String] {
        &self.config.allowed_email_domains
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                                 # Health check (public)
/// └── /v1/
///     ├── /auth/
///     │   ├── POST /register                  # Create account (public)
///     │   ├── POST /login                     # Issue tokens (public)
///     │   └── POST /refresh                   # Refresh access token (public)
///     ├── /conferences/
///     │   ├── GET    /                        # List (public)
///     │   ├── GET    /:id                     # Detail (public)
///     │   ├── POST   /                        # Create (authenticated)
///     │   ├── PUT    /:id                     # Update (authenticated)
///     │   ├── DELETE /:id                     # Delete (authenticated)
///     │   └── /:id/committee GET|POST         # Committee (authenticated)
///     ├── /committee/:id DELETE               # Remove member (organizer)
///     ├── /submissions/                       # Ownership-scoped (authenticated)
///     │   ├── GET /  POST /  GET /:id  PUT /:id
///     └── /admin/submissions/:id/
///         ├── POST /status                    # Workflow transition (organizer)
///         └── POST /payed                     # Payment flag (organizer)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Conference browsing is public; everything that writes requires auth
    let conference_public = Router::new()
        .route("/", get(routes::conferences::list_conferences))
        .route("/:id", get(routes::conferences::get_conference));

    let conference_authed = Router::new()
        .route("/", post(routes::conferences::create_conference))
        .route("/:id", put(routes::conferences::update_conference))
        .route("/:id", delete(routes::conferences::delete_conference))
        .route("/:id/committee", get(routes::committee::list_committee))
        .route("/:id/committee", post(routes::committee::add_member))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let committee_routes = Router::new()
        .route("/:id", delete(routes::committee::remove_member))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Submission routes: every operation is scoped to the authenticated user
    let submission_routes = Router::new()
        .route("/", get(routes::submissions::list_submissions))
        .route("/", post(routes::submissions::create_submission))
        .route("/:id", get(routes::submissions::get_submission))
        .route("/:id", put(routes::submissions::update_submission))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Organizer-only administrative path for status and payment changes
    let admin_routes = Router::new()
        .route("/submissions/:id/status", post(routes::admin::set_submission_status))
        .route("/submissions/:id/payed", post(routes::admin::set_submission_payed))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/conferences", conference_public.merge(conference_authed))
        .nest("/committee", committee_routes)
        .nest("/submissions", submission_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and validates the bearer token from the Authorization header,
/// then injects [`AuthContext`] into request extensions. Handlers read the
/// authenticated identity from there and never from the request body.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = confdesk_shared::auth::middleware::bearer_token(header)?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
