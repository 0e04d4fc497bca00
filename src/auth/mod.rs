//! Authentication state and token validation
//!
//! One `AuthStore` instance exists per client session. Login and logout are
//! driven from outside this crate (the login view, the guard's revalidation
//! path); everything else only reads `is_logged_in`.

use crate::api::types::TokenCheck;
use crate::api::HttpKnowledgeApi;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct AuthState {
    logged_in: bool,
    token: Option<String>,
}

/// Shared authentication store
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    state: Arc<RwLock<AuthState>>,
}

impl AuthStore {
    /// Create a logged-out store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the user is currently authenticated.
    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.logged_in
    }

    /// Current bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Record a successful login.
    pub async fn login(&self, token: impl Into<String>) {
        let mut state = self.state.write().await;
        state.logged_in = true;
        state.token = Some(token.into());
        tracing::info!("auth: logged in");
    }

    /// Clear all authentication state.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        state.logged_in = false;
        state.token = None;
        tracing::info!("auth: logged out");
    }
}

/// Collaborator checking whether the current token is still valid
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Ask the backend whether the session token is still good.
    async fn validate(&self) -> Result<TokenCheck>;
}

/// Token validator backed by the HTTP knowledge API
pub struct HttpTokenValidator {
    api: HttpKnowledgeApi,
}

impl HttpTokenValidator {
    /// Wrap an HTTP client carrying the session token.
    pub fn new(api: HttpKnowledgeApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self) -> Result<TokenCheck> {
        self.api.validate_token().await
    }
}
