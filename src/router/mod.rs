//! Client-side routing
//!
//! Route table, path resolution and the pre-navigation guard.

mod guard;
mod routes;

pub use guard::{GuardDecision, NavigationGuard};
pub use routes::{
    ResolvedRoute, RouteDef, RouteMeta, Router, KB_ID_PARAM, KNOWLEDGE_BASE_LIST_ROUTE,
    LOGIN_ROUTE,
};
