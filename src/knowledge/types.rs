//! Knowledge view-model types
//!
//! Cards are derived once from raw records when a page arrives; the detail
//! record is rebuilt every time a detail view opens.

use crate::api::types::{ContentChunk, FileRecord};
use crate::utils::{display_name, format_record_date, UNTITLED_LABEL};

/// File-type label synthesized for manually entered records
pub const MANUAL_FILE_TYPE: &str = "MANUAL";

/// List-row view-model derived from a raw knowledge-file record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeCard {
    /// Record identifier
    pub id: String,
    /// Raw file name as uploaded, extension included
    pub original_file_name: Option<String>,
    /// Name shown in the list, extension stripped
    pub display_name: String,
    /// Formatted last-update timestamp
    pub updated_at: String,
    /// Uppercased file-type badge; empty when unknown
    pub file_type: String,
    /// Whether this row's "more" menu is open
    pub is_more: bool,
}

impl KnowledgeCard {
    /// Derive a card from a raw record.
    pub fn from_record(record: &FileRecord) -> Self {
        let raw_name = record
            .file_name
            .as_deref()
            .or(record.title.as_deref())
            .or(record.source.as_deref())
            .unwrap_or(UNTITLED_LABEL);

        let file_type = record
            .file_type
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| {
                (record.record_type.as_deref() == Some("manual"))
                    .then(|| MANUAL_FILE_TYPE.to_string())
            })
            .map(|t| t.to_uppercase())
            .unwrap_or_default();

        Self {
            id: record.id.clone(),
            original_file_name: record.file_name.clone(),
            display_name: display_name(raw_name).to_string(),
            updated_at: record
                .updated_at
                .as_deref()
                .map(format_record_date)
                .unwrap_or_default(),
            file_type,
            is_more: false,
        }
    }
}

/// Expanded view-model for a single knowledge item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeDetails {
    /// Item title; keeps the raw name, extension included
    pub title: String,
    /// Formatted last-update timestamp
    pub time: String,
    /// Record identifier
    pub id: String,
    /// Record kind; defaults to `file`
    pub record_type: String,
    /// Source URL or path
    pub source: String,
    /// File type as reported by ingestion
    pub file_type: String,
    /// Ordered content chunks loaded so far
    pub md: Vec<ContentChunk>,
    /// Total chunk count across all pages
    pub total: u64,
}

impl KnowledgeDetails {
    /// Fill the metadata half of the record from a raw detail response.
    ///
    /// Content chunks are populated separately; the two halves are disjoint
    /// so either may arrive first.
    pub fn apply_metadata(&mut self, record: &FileRecord) {
        self.title = record
            .file_name
            .clone()
            .or_else(|| record.title.clone())
            .or_else(|| record.source.clone())
            .unwrap_or_else(|| UNTITLED_LABEL.to_string());
        self.time = record
            .updated_at
            .as_deref()
            .map(format_record_date)
            .unwrap_or_default();
        self.id = record.id.clone();
        self.record_type = record
            .record_type
            .clone()
            .unwrap_or_else(|| "file".to_string());
        self.source = record.source.clone().unwrap_or_default();
        self.file_type = record.file_type.clone().unwrap_or_default();
    }
}
