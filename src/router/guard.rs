//! Navigation guard
//!
//! Runs before every navigation and decides admission from the target
//! route's metadata and the auth store. Token revalidation is an opt-in
//! second step: when a validator is attached, a stale token clears the auth
//! state and lands the user back on the login view.

use super::routes::{ResolvedRoute, KNOWLEDGE_BASE_LIST_ROUTE, LOGIN_ROUTE};
use crate::auth::{AuthStore, TokenValidator};
use std::sync::Arc;

/// Outcome of a guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation through
    Proceed,
    /// Navigate to this path instead
    Redirect(String),
}

impl GuardDecision {
    fn redirect(path: &str) -> Self {
        GuardDecision::Redirect(path.to_string())
    }
}

/// Pre-navigation admission check
#[derive(Clone)]
pub struct NavigationGuard {
    auth: AuthStore,
    validator: Option<Arc<dyn TokenValidator>>,
}

impl NavigationGuard {
    /// Guard that only consults the local auth flag.
    pub fn new(auth: AuthStore) -> Self {
        Self {
            auth,
            validator: None,
        }
    }

    /// Also revalidate the token against the server on protected routes.
    pub fn with_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Evaluate the guard for a navigation target.
    pub async fn before_each(&self, to: &ResolvedRoute) -> GuardDecision {
        if to.meta.requires_auth == Some(false) || to.meta.requires_init == Some(false) {
            // Open route; an already-authenticated user has no business on
            // the login view and goes to the landing route instead.
            if to.path == LOGIN_ROUTE && self.auth.is_logged_in().await {
                return GuardDecision::redirect(KNOWLEDGE_BASE_LIST_ROUTE);
            }
            return GuardDecision::Proceed;
        }

        if !self.auth.is_logged_in().await {
            return GuardDecision::redirect(LOGIN_ROUTE);
        }

        if let Some(validator) = &self.validator {
            match validator.validate().await {
                Ok(check) if check.valid => {}
                Ok(_) => {
                    tracing::info!(path = %to.path, "token no longer valid, logging out");
                    self.auth.logout().await;
                    return GuardDecision::redirect(LOGIN_ROUTE);
                }
                Err(err) => {
                    tracing::warn!(path = %to.path, error = %err, "token validation failed");
                    self.auth.logout().await;
                    return GuardDecision::redirect(LOGIN_ROUTE);
                }
            }
        }

        GuardDecision::Proceed
    }
}
