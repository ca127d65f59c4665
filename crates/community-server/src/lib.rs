//! HTTP server for the community listings board.
//!
//! Routes:
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/health` | `OK` |
//! | GET | `/listings` | board of all published listings |
//! | GET | `/listings/new` | new listing form |
//! | GET | `/listings/:category_slug` | board for one category |
//! | POST | `/listings` | create a listing, spending one credit |
//!
//! `POST /listings` takes either a JSON body or the `/listings/new` form and
//! requires a session token issued by [`community_auth::JwtService`], sent as
//! `Authorization: Bearer <token>` or in the [`auth::SESSION_COOKIE`] cookie.
//! Every error, including unreadable bodies, is answered with
//! `{"error": {"code", "message"}}`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;
pub mod views;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use auth::AuthUser;
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/listings", get(handlers::index).post(handlers::create))
        .route("/listings/new", get(handlers::new_listing))
        .route("/listings/:category_slug", get(handlers::category))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
