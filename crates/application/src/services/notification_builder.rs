//! 通知构建器
//!
//! 对消息事件作出反应，派生通知记录。通知写入是次要副作用：
//! 存储失败只记录日志并继续，绝不拖垮主写入。

use crate::dispatcher::EventHandler;
use crate::errors::ApplicationResult;
use async_trait::async_trait;
use domain::events::{EventKind, MessageEvent};
use domain::repositories::{MessageRepository, NotificationRepository, UserRepository};
use domain::{Message, Notification, NotificationKind};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// 通知构建器
pub struct NotificationBuilder {
    notification_repository: Arc<dyn NotificationRepository>,
    message_repository: Arc<dyn MessageRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl NotificationBuilder {
    pub fn new(
        notification_repository: Arc<dyn NotificationRepository>,
        message_repository: Arc<dyn MessageRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notification_repository,
            message_repository,
            user_repository,
        }
    }

    /// 查询发送者用户名，查不到时退化为ID片段
    async fn sender_name(&self, sender_id: Uuid) -> String {
        match self.user_repository.find_by_id(sender_id).await {
            Ok(Some(user)) => user.username,
            Ok(None) => format!("user-{}", &sender_id.to_string()[..8]),
            Err(err) => {
                warn!(sender_id = %sender_id, error = %err, "查询发送者失败");
                format!("user-{}", &sender_id.to_string()[..8])
            }
        }
    }

    /// 写入通知，存储失败记录日志并继续
    async fn store(&self, notification: Notification) {
        if let Err(err) = self.notification_repository.insert(&notification).await {
            warn!(
                user_id = %notification.user_id,
                kind = %notification.kind,
                error = %err,
                "通知写入失败，已跳过"
            );
        }
    }

    async fn on_message_created(&self, message: &Message) {
        let sender_name = self.sender_name(message.sender_id).await;

        let parent = match message.parent_id {
            Some(parent_id) => match self.message_repository.find_by_id(parent_id).await {
                Ok(Some(parent)) => Some(parent),
                Ok(None) => {
                    warn!(parent_id = %parent_id, "被回复的消息已不存在，按普通消息通知");
                    None
                }
                Err(err) => {
                    warn!(parent_id = %parent_id, error = %err, "查询被回复消息失败，按普通消息通知");
                    None
                }
            },
            None => None,
        };

        // 同一事件对同一用户至多一条通知。接收者恰好是被回复消息的
        // 发送者时，只发更具体的 reply，不再叠加 new_message。
        // 回复者即被回复消息的发送者（自我对话）不产生 reply。
        if let Some(parent) = &parent {
            if parent.sender_id == message.receiver_id && parent.sender_id != message.sender_id {
                self.store(Notification::new(
                    message.receiver_id,
                    Some(message.id),
                    NotificationKind::Reply,
                    format!("{} replied to your message", sender_name),
                ))
                .await;
                return;
            }
        }

        self.store(Notification::new(
            message.receiver_id,
            Some(message.id),
            NotificationKind::NewMessage,
            format!("You have a new message from {}", sender_name),
        ))
        .await;

        // 第三方线程：另行通知被回复消息的发送者。回复自己的消息
        // 不产生自我通知。
        if let Some(parent) = &parent {
            if parent.sender_id != message.sender_id {
                self.store(Notification::new(
                    parent.sender_id,
                    Some(message.id),
                    NotificationKind::Reply,
                    format!("{} replied to your message", sender_name),
                ))
                .await;
            }
        }
    }

    async fn on_message_edited(&self, old: &Message, new: &Message) {
        if old.content == new.content {
            return;
        }

        let sender_name = self.sender_name(new.sender_id).await;
        self.store(Notification::new(
            new.receiver_id,
            Some(new.id),
            NotificationKind::Edit,
            format!("{} edited their message", sender_name),
        ))
        .await;
    }
}

#[async_trait]
impl EventHandler for NotificationBuilder {
    fn name(&self) -> &'static str {
        "notification_builder"
    }

    fn interested_in(&self, kind: EventKind) -> bool {
        matches!(kind, EventKind::MessageCreated | EventKind::MessageEdited)
    }

    async fn handle(&self, event: &MessageEvent) -> ApplicationResult<()> {
        match event {
            MessageEvent::MessageCreated { message } => self.on_message_created(message).await,
            MessageEvent::MessageEdited { old, new } => self.on_message_edited(old, new).await,
            MessageEvent::UserDeleted { .. } => {}
        }
        Ok(())
    }
}
