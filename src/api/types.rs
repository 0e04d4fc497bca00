//! Wire contracts for the knowledge backend
//!
//! Request/response shapes only; the transport lives behind the
//! [`KnowledgeApi`](super::KnowledgeApi) trait.

use serde::{Deserialize, Serialize};

/// Pagination cursor with optional list filters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub page_size: u32,
    /// Restrict to a tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    /// Full-text keyword filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Restrict to a file type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 35,
            tag_id: None,
            keyword: None,
            file_type: None,
        }
    }
}

impl PageQuery {
    /// First page with the given page size, no filters.
    pub fn first_page(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            ..Self::default()
        }
    }

    /// Same filters, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Raw knowledge-file record as the backend returns it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileRecord {
    /// Record identifier
    pub id: String,
    /// Original file name, extension included
    #[serde(default)]
    pub file_name: Option<String>,
    /// Record title (manual entries)
    #[serde(default)]
    pub title: Option<String>,
    /// Source URL or path
    #[serde(default)]
    pub source: Option<String>,
    /// Record kind: `file`, `url` or `manual`
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    /// File type as reported by ingestion
    #[serde(default)]
    pub file_type: Option<String>,
    /// Last update timestamp, RFC 3339
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One page of knowledge-file records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilePage {
    /// Records for the requested page
    #[serde(default)]
    pub data: Vec<FileRecord>,
    /// Total record count across all pages for the current filters
    #[serde(default)]
    pub total: u64,
}

/// Structured error envelope inside a failed response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable server message
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable code, e.g. `duplicate_file`
    #[serde(default)]
    pub code: Option<String>,
}

/// Upload outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Whether the upload was accepted
    #[serde(default)]
    pub success: bool,
    /// Created record on success
    #[serde(default)]
    pub data: Option<FileRecord>,
    /// Structured error envelope
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    /// Top-level message fallback
    #[serde(default)]
    pub message: Option<String>,
    /// Top-level code fallback
    #[serde(default)]
    pub code: Option<String>,
}

/// Detail metadata outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Whether the record was found
    #[serde(default)]
    pub success: bool,
    /// The record, when found
    #[serde(default)]
    pub data: Option<FileRecord>,
}

/// Delete outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether the record was deleted
    #[serde(default)]
    pub success: bool,
}

/// One chunk of ingested document content
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentChunk {
    /// Chunk identifier
    #[serde(default)]
    pub id: String,
    /// Markdown content
    #[serde(default)]
    pub content: String,
    /// Position within the document
    #[serde(default)]
    pub chunk_index: u32,
}

/// One page of content chunks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkPage {
    /// Whether the page was served
    #[serde(default)]
    pub success: bool,
    /// Chunks for the requested page
    #[serde(default)]
    pub data: Option<Vec<ContentChunk>>,
    /// Total chunk count across all pages
    #[serde(default)]
    pub total: Option<u64>,
}

/// Token validation outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenCheck {
    /// Whether the presented token is still valid
    #[serde(default)]
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 35);
        assert!(query.tag_id.is_none());
    }

    #[test]
    fn test_page_query_with_page_keeps_filters() {
        let query = PageQuery {
            keyword: Some("contract".to_string()),
            ..PageQuery::first_page(20)
        };
        let next = query.with_page(2);
        assert_eq!(next.page, 2);
        assert_eq!(next.page_size, 20);
        assert_eq!(next.keyword.as_deref(), Some("contract"));
    }

    #[test]
    fn test_file_page_tolerates_sparse_records() {
        let page: FilePage = serde_json::from_str(
            r#"{"data":[{"id":"k1","type":"manual"},{"id":"k2","file_name":"a.pdf","updated_at":"2024-01-01T00:00:00Z"}],"total":7}"#,
        )
        .unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].record_type.as_deref(), Some("manual"));
        assert!(page.data[0].file_name.is_none());
    }

    #[test]
    fn test_upload_response_error_envelope() {
        let resp: UploadResponse = serde_json::from_str(
            r#"{"success":false,"error":{"message":"already ingested","code":"duplicate_file"}}"#,
        )
        .unwrap();
        assert!(!resp.success);
        let err = resp.error.unwrap();
        assert_eq!(err.code.as_deref(), Some("duplicate_file"));
    }

    #[test]
    fn test_chunk_page_without_total() {
        let page: ChunkPage =
            serde_json::from_str(r##"{"success":true,"data":[{"id":"c1","content":"# h"}]}"##)
                .unwrap();
        assert!(page.success);
        assert!(page.total.is_none());
        assert_eq!(page.data.unwrap()[0].content, "# h");
    }
}
