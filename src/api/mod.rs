//! Remote knowledge API surface
//!
//! The handler is written against the [`KnowledgeApi`] trait; the bundled
//! [`HttpKnowledgeApi`] speaks the backend's REST dialect but any
//! implementation (including the in-memory mocks used in tests) can stand
//! in for it.

mod http;
pub mod types;

pub use http::HttpKnowledgeApi;
pub use types::{
    ApiErrorBody, ChunkPage, ContentChunk, DeleteResponse, DetailResponse, FilePage, FileRecord,
    PageQuery, TokenCheck, UploadResponse,
};

use crate::error::Result;
use crate::files::UploadFile;
use async_trait::async_trait;

/// Remote collaborator serving knowledge-file CRUD
#[async_trait]
pub trait KnowledgeApi: Send + Sync {
    /// List knowledge files under a knowledge base.
    async fn list_files(&self, kb_id: &str, query: &PageQuery) -> Result<FilePage>;

    /// Upload a file into a knowledge base.
    async fn upload_file(&self, kb_id: &str, file: &UploadFile) -> Result<UploadResponse>;

    /// Fetch metadata for a single knowledge item.
    async fn get_details(&self, item_id: &str) -> Result<DetailResponse>;

    /// Delete a knowledge item.
    async fn delete_details(&self, item_id: &str) -> Result<DeleteResponse>;

    /// Fetch one page of content chunks for a knowledge item.
    async fn get_details_content(&self, item_id: &str, page: u32) -> Result<ChunkPage>;
}
