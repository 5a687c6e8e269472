//! 用户数据清理器
//!
//! 对 `UserDeleted` 事件作出反应：删除该用户作为发送者或接收者的
//! 全部消息（每条消息的历史记录与关联通知随之级联删除），以及
//! 发给该用户的全部通知。

use crate::dispatcher::EventHandler;
use crate::errors::ApplicationResult;
use async_trait::async_trait;
use domain::events::{EventKind, MessageEvent};
use domain::repositories::{MessageRepository, NotificationRepository};
use std::sync::Arc;
use tracing::info;

/// 用户数据清理器
pub struct UserDataCleaner {
    message_repository: Arc<dyn MessageRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
}

impl UserDataCleaner {
    pub fn new(
        message_repository: Arc<dyn MessageRepository>,
        notification_repository: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            message_repository,
            notification_repository,
        }
    }
}

#[async_trait]
impl EventHandler for UserDataCleaner {
    fn name(&self) -> &'static str {
        "user_data_cleaner"
    }

    fn interested_in(&self, kind: EventKind) -> bool {
        kind == EventKind::UserDeleted
    }

    async fn handle(&self, event: &MessageEvent) -> ApplicationResult<()> {
        let MessageEvent::UserDeleted { user_id, username } = event else {
            return Ok(());
        };

        let deleted_messages = self.message_repository.delete_by_user(*user_id).await?;
        let deleted_notifications = self
            .notification_repository
            .delete_by_user(*user_id)
            .await?;

        info!(
            user_id = %user_id,
            username = %username,
            deleted_messages,
            deleted_notifications,
            "已清理用户关联数据"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{MockMessageRepository, MockNotificationRepository};
    use mockall::predicate::eq;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_cleanup_deletes_messages_and_notifications() {
        let user_id = Uuid::new_v4();

        let mut message_repo = MockMessageRepository::new();
        message_repo
            .expect_delete_by_user()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(3));

        let mut notification_repo = MockNotificationRepository::new();
        notification_repo
            .expect_delete_by_user()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(2));

        let cleaner = UserDataCleaner::new(Arc::new(message_repo), Arc::new(notification_repo));
        cleaner
            .handle(&MessageEvent::user_deleted(user_id, "alice"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_other_events_are_ignored() {
        let mut message_repo = MockMessageRepository::new();
        message_repo.expect_delete_by_user().times(0);
        let mut notification_repo = MockNotificationRepository::new();
        notification_repo.expect_delete_by_user().times(0);

        let cleaner = UserDataCleaner::new(Arc::new(message_repo), Arc::new(notification_repo));
        let message = domain::Message::new(Uuid::new_v4(), Uuid::new_v4(), "hi").unwrap();
        cleaner
            .handle(&MessageEvent::message_created(message))
            .await
            .unwrap();
    }
}
