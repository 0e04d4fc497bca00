//! Shared knowledge list store
//!
//! Process-wide reactive collection of cards plus the server-reported total
//! for the current filter set. One instance is shared across views; the
//! handler is the only writer.

use super::types::KnowledgeCard;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ListState {
    cards: Vec<KnowledgeCard>,
    total: u64,
}

/// Shared card list + total count
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    state: Arc<RwLock<ListState>>,
}

impl KnowledgeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list wholesale (page-1 fetch).
    pub async fn replace(&self, cards: Vec<KnowledgeCard>, total: u64) {
        let mut state = self.state.write().await;
        state.cards = cards;
        state.total = total;
    }

    /// Append a later page, adopting the latest server-reported total.
    pub async fn append(&self, mut cards: Vec<KnowledgeCard>, total: u64) {
        let mut state = self.state.write().await;
        state.cards.append(&mut cards);
        state.total = total;
    }

    /// Snapshot of the current cards.
    pub async fn cards(&self) -> Vec<KnowledgeCard> {
        self.state.read().await.cards.clone()
    }

    /// Latest server-reported total.
    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    /// Number of cards currently loaded.
    pub async fn len(&self) -> usize {
        self.state.read().await.cards.len()
    }

    /// Whether any cards are loaded.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.cards.is_empty()
    }

    /// Set a row's "more" menu flag; out-of-range indexes are ignored.
    pub async fn set_more_flag(&self, index: usize, open: bool) {
        let mut state = self.state.write().await;
        if let Some(card) = state.cards.get_mut(index) {
            card.is_more = open;
        }
    }

    /// Close a row's "more" menu. Cosmetic only; no list semantics depend
    /// on the flag.
    pub async fn clear_more_flag(&self, index: usize) {
        self.set_more_flag(index, false).await;
    }
}
