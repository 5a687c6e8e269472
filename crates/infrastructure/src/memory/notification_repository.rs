//! 通知仓储的内存实现

use super::MemoryStore;
use async_trait::async_trait;
use domain::repositories::NotificationRepository;
use domain::{DomainResult, Notification};
use std::sync::Arc;
use uuid::Uuid;

pub struct InMemoryNotificationRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryNotificationRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notification: &Notification) -> DomainResult<()> {
        let mut notifications = self.store.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Notification>> {
        let notifications = self.store.notifications.read().await;
        let mut records: Vec<Notification> = notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> DomainResult<u64> {
        let mut notifications = self.store.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|_, n| n.user_id != user_id);
        Ok((before - notifications.len()) as u64)
    }
}
