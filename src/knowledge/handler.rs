//! Knowledge operations handler
//!
//! Orchestrates listing, upload, deletion and detail retrieval against the
//! remote API and reconciles the shared store. Read failures stay silent
//! (background refreshes should not nag), write failures surface as
//! notices. The store is only ever reconciled via full refetch, never
//! patched in place.

use super::store::KnowledgeStore;
use super::types::{KnowledgeCard, KnowledgeDetails};
use crate::api::types::PageQuery;
use crate::api::KnowledgeApi;
use crate::config::ClientConfig;
use crate::files::{is_invalid_upload, UploadFile, UploadInput};
use crate::notify::Notifier;
use crate::router::{ResolvedRoute, KB_ID_PARAM};
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;

/// Error code the backend uses for re-uploads of an existing file
const DUPLICATE_FILE_CODE: &str = "duplicate_file";

/// Where the handler currently "is" in the application
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    /// Current pathname
    pub path: String,
    /// Bound route params
    pub params: HashMap<String, String>,
}

impl From<&ResolvedRoute> for RouteContext {
    fn from(route: &ResolvedRoute) -> Self {
        Self {
            path: route.path.clone(),
            params: route.params.clone(),
        }
    }
}

/// Knowledge listing/upload/detail orchestrator
pub struct KnowledgeHandler {
    api: Arc<dyn KnowledgeApi>,
    notifier: Arc<dyn Notifier>,
    store: KnowledgeStore,
    config: ClientConfig,
    default_kb_id: Option<String>,
    route: RwLock<RouteContext>,
    more_index: RwLock<Option<usize>>,
    details: RwLock<KnowledgeDetails>,
    // Monotonic fetch sequence; list responses that are no longer the
    // latest issued request are discarded instead of applied.
    fetch_seq: AtomicU64,
}

impl KnowledgeHandler {
    /// Create a handler over an API collaborator, a notice sink and the
    /// shared store.
    pub fn new(
        api: Arc<dyn KnowledgeApi>,
        notifier: Arc<dyn Notifier>,
        store: KnowledgeStore,
        config: ClientConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            store,
            config,
            default_kb_id: None,
            route: RwLock::new(RouteContext::default()),
            more_index: RwLock::new(None),
            details: RwLock::new(KnowledgeDetails::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    /// Set the knowledge base used when neither an argument nor the route
    /// provides one.
    pub fn with_default_kb(mut self, kb_id: impl Into<String>) -> Self {
        self.default_kb_id = Some(kb_id.into());
        self
    }

    /// Shared store this handler reconciles.
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Record the route the handler is operating under.
    pub async fn set_route(&self, route: &ResolvedRoute) {
        *self.route.write().await = RouteContext::from(route);
    }

    /// Record a raw route context (path + params).
    pub async fn set_route_context(&self, context: RouteContext) {
        *self.route.write().await = context;
    }

    /// Index of the row whose "more" menu is open.
    pub async fn more_index(&self) -> Option<usize> {
        *self.more_index.read().await
    }

    /// Open a row's "more" menu.
    pub async fn open_more(&self, index: usize) {
        *self.more_index.write().await = Some(index);
    }

    /// Menu visibility callback; closing resets the open index.
    pub async fn on_visible_change(&self, visible: bool) {
        if !visible {
            *self.more_index.write().await = None;
        }
    }

    /// Snapshot of the detail record.
    pub async fn details(&self) -> KnowledgeDetails {
        self.details.read().await.clone()
    }

    /// Fetch one page of knowledge files into the store.
    ///
    /// The target knowledge base is the explicit `kb_id` argument, else the
    /// route's `kbId` param, else the handler default; with none of those
    /// this is a silent no-op. Page 1 replaces the list, later pages
    /// append. Failures are swallowed: background list refreshes never
    /// produce a notice.
    pub async fn fetch_page(&self, query: PageQuery, kb_id: Option<&str>) {
        let target = match self.resolve_list_target(kb_id).await {
            Some(target) => target,
            None => return,
        };

        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        match self.api.list_files(&target, &query).await {
            Ok(page) => {
                if self.fetch_seq.load(Ordering::SeqCst) != seq {
                    tracing::debug!(kb_id = %target, page = query.page, "discarding stale list response");
                    return;
                }
                let cards: Vec<KnowledgeCard> =
                    page.data.iter().map(KnowledgeCard::from_record).collect();
                if query.page == 1 {
                    self.store.replace(cards, page.total).await;
                } else {
                    self.store.append(cards, page.total).await;
                }
            }
            Err(err) => {
                tracing::debug!(kb_id = %target, error = %err, "list refresh failed");
            }
        }
    }

    /// Delete a knowledge item and resynchronize the list.
    ///
    /// The row's menu flag is closed up front and stays closed on failure;
    /// the flag carries no list semantics. The list itself is reconciled by
    /// refetching, not by local removal.
    pub async fn delete(&self, index: usize, item: &KnowledgeCard) {
        self.store.clear_more_flag(index).await;
        *self.more_index.write().await = None;

        match self.api.delete_details(&item.id).await {
            Ok(resp) if resp.success => {
                self.notifier.info("Knowledge deleted");
                self.fetch_page(PageQuery::first_page(self.config.page_size), None)
                    .await;
            }
            Ok(_) => self.notifier.error("Failed to delete knowledge"),
            Err(err) => {
                tracing::warn!(item_id = %item.id, error = %err, "delete failed");
                self.notifier.error("Failed to delete knowledge");
            }
        }
    }

    /// Upload a file into the current knowledge base.
    ///
    /// Validation runs before any network call; rejected files never reach
    /// the API. The input handle is cleared after the API call on both the
    /// success and the failure path so the same file name can be selected
    /// again.
    pub async fn upload(&self, file: Option<&UploadFile>, input: Option<&UploadInput>) {
        let (file, input) = match (file, input) {
            (Some(file), Some(input)) => (file, input),
            _ => {
                self.notifier.error("Invalid file");
                return;
            }
        };

        if is_invalid_upload(file, false, &self.notifier, self.config.max_file_size_mb) {
            return;
        }

        let kb_id = self.resolve_upload_target().await;
        let kb_id = match kb_id {
            Some(kb_id) => kb_id,
            None => {
                self.notifier.error("Missing knowledge-base id");
                return;
            }
        };

        match self.api.upload_file(&kb_id, file).await {
            Ok(resp) if resp.success => {
                self.notifier.info("Upload complete");
                self.fetch_page(PageQuery::first_page(self.config.page_size), Some(&kb_id))
                    .await;
            }
            Ok(resp) => {
                let code = resp
                    .code
                    .as_deref()
                    .or(resp.error.as_ref().and_then(|e| e.code.as_deref()));
                let server_message = resp.error.as_ref().and_then(|e| e.message.as_deref());
                self.notifier.error(upload_failure_message(
                    code,
                    server_message,
                    resp.message.as_deref(),
                ));
            }
            Err(err) => {
                tracing::warn!(kb_id = %kb_id, error = %err, "upload failed");
                let code = err.code().map(str::to_string);
                let message = match &err {
                    crate::error::Error::Business { message, .. } => Some(message.clone()),
                    _ => None,
                };
                self.notifier.error(upload_failure_message(
                    code.as_deref(),
                    message.as_deref(),
                    None,
                ));
            }
        }

        input.clear();
    }

    /// Open the detail view for an item.
    ///
    /// Resets the detail record, then fetches metadata and the first
    /// content page concurrently. The two calls populate disjoint fields,
    /// so either half arriving alone is a valid intermediate state; both
    /// are error-silent.
    pub async fn open_detail(&self, item: &KnowledgeCard) {
        *self.details.write().await = KnowledgeDetails::default();

        let metadata = async {
            match self.api.get_details(&item.id).await {
                Ok(resp) if resp.success => {
                    if let Some(record) = resp.data {
                        self.details.write().await.apply_metadata(&record);
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(item_id = %item.id, error = %err, "detail metadata fetch failed");
                }
            }
        };
        let content = self.load_more_content(&item.id, 1);

        tokio::join!(metadata, content);
    }

    /// Fetch a page of content chunks into the detail record.
    ///
    /// Page 1 replaces the chunk sequence, later pages append; the chunk
    /// total tracks the latest response. Error-silent like all reads.
    pub async fn load_more_content(&self, item_id: &str, page: u32) {
        match self.api.get_details_content(item_id, page).await {
            Ok(resp) if resp.success => {
                if let Some(chunks) = resp.data {
                    let mut details = self.details.write().await;
                    if page == 1 {
                        details.md = chunks;
                    } else {
                        details.md.extend(chunks);
                    }
                    if let Some(total) = resp.total {
                        details.total = total;
                    }
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(item_id = %item_id, page, error = %err, "content fetch failed");
            }
        }
    }

    async fn resolve_list_target(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(kb_id) = explicit {
            return Some(kb_id.to_string());
        }
        let route = self.route.read().await;
        if let Some(kb_id) = route.params.get(KB_ID_PARAM) {
            return Some(kb_id.clone());
        }
        self.default_kb_id.clone()
    }

    async fn resolve_upload_target(&self) -> Option<String> {
        let route = self.route.read().await;
        if let Some(kb_id) = route.params.get(KB_ID_PARAM) {
            return Some(kb_id.clone());
        }
        if let Some(kb_id) = kb_id_from_path(&route.path) {
            return Some(kb_id);
        }
        drop(route);
        self.default_kb_id.clone()
    }
}

/// Pull a knowledge-base id out of a pathname like
/// `/platform/knowledge-bases/<id>/...`.
fn kb_id_from_path(path: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"knowledge-bases/([^/]+)").expect("knowledge-base path pattern is valid")
    });
    pattern
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Message chain for a failed upload: duplicate-file code first, then the
/// server's error message, then the wrapper message, then a generic text.
fn upload_failure_message(
    code: Option<&str>,
    server_message: Option<&str>,
    wrapper_message: Option<&str>,
) -> String {
    if code == Some(DUPLICATE_FILE_CODE) {
        return "File already exists".to_string();
    }
    server_message
        .or(wrapper_message)
        .unwrap_or("Upload failed")
        .to_string()
}
