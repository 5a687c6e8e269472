//! 内存仓储实现
//!
//! 四个仓储共享同一个 [`MemoryStore`]，以便消息删除时跨表级联清理
//! 历史记录和关联通知。锁获取顺序固定为
//! messages → histories → notifications → users，避免死锁。

mod message_history_repository;
mod message_repository;
mod notification_repository;
mod user_repository;

pub use message_history_repository::InMemoryMessageHistoryRepository;
pub use message_repository::InMemoryMessageRepository;
pub use notification_repository::InMemoryNotificationRepository;
pub use user_repository::InMemoryUserRepository;

use domain::{Message, MessageHistory, Notification, User};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// 共享的内存存储
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) messages: RwLock<HashMap<Uuid, Message>>,
    /// message_id → 历史记录（写入顺序即捕获顺序）
    pub(crate) histories: RwLock<HashMap<Uuid, Vec<MessageHistory>>>,
    pub(crate) notifications: RwLock<HashMap<Uuid, Notification>>,
    pub(crate) users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 删除一条消息并级联清理其历史记录与关联通知
    pub(crate) async fn delete_message_cascading(&self, message_id: Uuid) -> bool {
        let removed = self.messages.write().await.remove(&message_id).is_some();
        if removed {
            self.histories.write().await.remove(&message_id);
            self.notifications
                .write()
                .await
                .retain(|_, n| n.message_id != Some(message_id));
        }
        removed
    }
}
