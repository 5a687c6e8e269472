//! 消息编辑历史仓储的内存实现

use super::MemoryStore;
use async_trait::async_trait;
use domain::repositories::MessageHistoryRepository;
use domain::{DomainResult, MessageHistory};
use std::sync::Arc;
use uuid::Uuid;

pub struct InMemoryMessageHistoryRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryMessageHistoryRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageHistoryRepository for InMemoryMessageHistoryRepository {
    async fn insert(&self, history: &MessageHistory) -> DomainResult<()> {
        let mut histories = self.store.histories.write().await;
        histories
            .entry(history.message_id)
            .or_default()
            .push(history.clone());
        Ok(())
    }

    async fn find_by_message(&self, message_id: Uuid) -> DomainResult<Vec<MessageHistory>> {
        let histories = self.store.histories.read().await;
        let mut records = histories.get(&message_id).cloned().unwrap_or_default();
        records.sort_by(|a, b| a.edited_at.cmp(&b.edited_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn count_by_message(&self, message_id: Uuid) -> DomainResult<u64> {
        let histories = self.store.histories.read().await;
        Ok(histories.get(&message_id).map(|v| v.len() as u64).unwrap_or(0))
    }
}
