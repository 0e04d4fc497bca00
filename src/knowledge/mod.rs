//! Knowledge-file listing, upload and detail retrieval
//!
//! The handler orchestrates operations against the remote API; the store
//! holds the shared card list the views render from.

pub mod handler;
pub mod store;
pub mod types;

pub use handler::{KnowledgeHandler, RouteContext};
pub use store::KnowledgeStore;
pub use types::{KnowledgeCard, KnowledgeDetails, MANUAL_FILE_TYPE};
