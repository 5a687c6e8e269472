//! 消息仓储的内存实现

use super::MemoryStore;
use async_trait::async_trait;
use domain::repositories::{MessageRepository, UnreadMessage};
use domain::{DomainError, DomainResult, Message};
use std::sync::Arc;
use uuid::Uuid;

pub struct InMemoryMessageRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryMessageRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert(&self, message: &Message) -> DomainResult<()> {
        let mut messages = self.store.messages.write().await;
        if messages.contains_key(&message.id) {
            return Err(DomainError::storage(format!("消息ID已存在: {}", message.id)));
        }
        messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Message>> {
        Ok(self.store.messages.read().await.get(&id).cloned())
    }

    async fn update(&self, message: &Message) -> DomainResult<()> {
        let mut messages = self.store.messages.write().await;
        match messages.get_mut(&message.id) {
            Some(stored) => {
                // 创建后只有这三个字段可变
                stored.content = message.content.clone();
                stored.edited = message.edited;
                stored.read = message.read;
                Ok(())
            }
            None => Err(DomainError::resource_not_found(
                "Message",
                message.id.to_string(),
            )),
        }
    }

    async fn mark_read(&self, message_id: Uuid) -> DomainResult<()> {
        let mut messages = self.store.messages.write().await;
        match messages.get_mut(&message_id) {
            Some(stored) => {
                stored.mark_read();
                Ok(())
            }
            None => Err(DomainError::resource_not_found(
                "Message",
                message_id.to_string(),
            )),
        }
    }

    async fn delete(&self, message_id: Uuid) -> DomainResult<()> {
        if !self.store.delete_message_cascading(message_id).await {
            return Err(DomainError::resource_not_found(
                "Message",
                message_id.to_string(),
            ));
        }
        Ok(())
    }

    async fn delete_by_user(&self, user_id: Uuid) -> DomainResult<u64> {
        let targets: Vec<Uuid> = {
            let messages = self.store.messages.read().await;
            messages
                .values()
                .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
                .map(|m| m.id)
                .collect()
        };

        let mut deleted = 0u64;
        for message_id in targets {
            if self.store.delete_message_cascading(message_id).await {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn find_unread_by_receiver(&self, receiver_id: Uuid) -> DomainResult<Vec<UnreadMessage>> {
        let messages = self.store.messages.read().await;
        let mut unread: Vec<UnreadMessage> = messages
            .values()
            .filter(|m| m.receiver_id == receiver_id && !m.read)
            .map(UnreadMessage::from)
            .collect();
        unread.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(unread)
    }

    async fn find_replies(&self, parent_id: Uuid) -> DomainResult<Vec<Message>> {
        let messages = self.store.messages.read().await;
        let mut replies: Vec<Message> = messages
            .values()
            .filter(|m| m.parent_id == Some(parent_id))
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(replies)
    }
}
