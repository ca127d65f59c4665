//! Shared handler state.

use std::sync::Arc;

use community_auth::{AuthResult, JwtConfig, JwtService};
use community_service::ListingService;
use community_store::Repositories;

/// Everything a handler needs, cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub listings: ListingService,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    /// Wire services over the given repositories.
    pub fn new(repos: Repositories, jwt: JwtService) -> Self {
        Self {
            listings: ListingService::new(repos.clone()),
            jwt: Arc::new(jwt),
            repos,
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(jwt: JwtConfig) -> AuthResult<Self> {
        Ok(Self::new(Repositories::in_memory(), JwtService::new(jwt)?))
    }
}
