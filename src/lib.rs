//! Headless client core for a knowledge-base chat application.
//!
//! Backs the knowledge views of the web client: the route table and
//! navigation guard decide admission, the knowledge handler orchestrates
//! list / upload / delete / detail operations against the remote API, and
//! the shared store holds the card list the views render from.
//!
//! ## Architecture
//!
//! ```text
//! Router ── resolve(path) ──▶ ResolvedRoute ── NavigationGuard ──▶ admit / redirect
//!                                                   │
//!                                               AuthStore ◀── TokenValidator (opt-in)
//!
//! KnowledgeHandler ── KnowledgeApi (trait) ──▶ HttpKnowledgeApi ──▶ backend
//!        │
//!        ├─▶ KnowledgeStore   shared card list + total
//!        ├─▶ KnowledgeDetails per-item detail record
//!        └─▶ Notifier         user-facing notices
//! ```
//!
//! Control flow: the guard admits a navigation, the mounting view asks the
//! handler for page 1, the handler reconciles the store, the view renders
//! from the store. User actions (upload, delete, "load more") go back
//! through the handler, which always resynchronizes by refetching rather
//! than patching the list in place.
//!
//! ## Modules
//!
//! - [`router`]: route table, path resolution and the navigation guard
//! - [`auth`]: authentication store and token validation
//! - [`knowledge`]: listing/upload/detail orchestration and the shared store
//! - [`api`]: remote API trait, wire contracts and the HTTP client
//! - [`files`]: upload handles and local file validation
//! - [`notify`]: user-facing notification sink
//! - [`config`]: environment-sourced client configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod files;
pub mod knowledge;
pub mod notify;
pub mod router;
pub mod utils;

pub use config::ClientConfig;
pub use error::{Error, Result};
