//! 消息处理服务
//!
//! 实现消息的核心业务逻辑：发送、编辑、已读标记、未读查询，
//! 以及用户删除。事件在执行存储写入的代码处显式发布：
//! `MessageCreated` 在主写入之后发布；`MessageEdited` 在更新提交
//! 之前发布，保证历史捕获发生在提交前；`UserDeleted` 在用户行
//! 删除之后发布，由处理器完成级联清理。

use crate::dispatcher::EventDispatcher;
use crate::errors::{ApplicationError, ApplicationResult};
use domain::events::MessageEvent;
use domain::repositories::{MessageRepository, UnreadMessage, UserRepository};
use domain::Message;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 消息服务依赖
pub struct MessagingServiceDependencies {
    pub message_repository: Arc<dyn MessageRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub dispatcher: Arc<EventDispatcher>,
}

/// 消息服务
pub struct MessagingService {
    message_repository: Arc<dyn MessageRepository>,
    user_repository: Arc<dyn UserRepository>,
    dispatcher: Arc<EventDispatcher>,
}

impl MessagingService {
    pub fn new(deps: MessagingServiceDependencies) -> Self {
        Self {
            message_repository: deps.message_repository,
            user_repository: deps.user_repository,
            dispatcher: deps.dispatcher,
        }
    }

    /// 发送消息
    ///
    /// 校验内容与收发双方，parent（若有）必须指向已存在的消息。
    /// 主写入失败直接上抛；写入成功后发布 `MessageCreated`。
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: impl Into<String>,
        parent_id: Option<Uuid>,
    ) -> ApplicationResult<Message> {
        self.ensure_user_exists(sender_id).await?;
        self.ensure_user_exists(receiver_id).await?;

        let message = match parent_id {
            Some(parent_id) => {
                // 回复必须指向已存在的消息
                self.message_repository
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| {
                        ApplicationError::NotFound(format!("被回复的消息不存在: {}", parent_id))
                    })?;
                Message::new_reply(sender_id, receiver_id, content, parent_id)?
            }
            None => Message::new(sender_id, receiver_id, content)?,
        };

        self.message_repository.insert(&message).await?;
        debug!(message_id = %message.id, "消息已写入");

        self.dispatcher
            .publish(&MessageEvent::message_created(message.clone()))
            .await?;

        Ok(message)
    }

    /// 编辑消息
    ///
    /// 从存储读出更新前的权威旧版本；内容未变化时不产生历史、
    /// 不发布事件、`edited` 保持不变。内容变化时先发布
    /// `MessageEdited`（历史捕获在此阶段完成，失败则中止编辑），
    /// 再提交更新。
    pub async fn edit_message(
        &self,
        message_id: Uuid,
        new_content: impl Into<String>,
    ) -> ApplicationResult<Message> {
        let old = self
            .message_repository
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("消息不存在: {}", message_id)))?;

        let mut updated = old.clone();
        let changed = updated.apply_edit(new_content)?;
        if !changed {
            debug!(message_id = %message_id, "内容未变化，跳过编辑");
            return Ok(old);
        }

        // 提交前发布：历史追踪器在这里捕获旧内容
        self.dispatcher
            .publish(&MessageEvent::message_edited(old, updated.clone()))
            .await?;

        self.message_repository.update(&updated).await?;
        debug!(message_id = %message_id, "消息编辑已提交");

        Ok(updated)
    }

    /// 删除用户及其关联数据
    ///
    /// 删除用户行后发布 `UserDeleted`，级联清理由事件处理器完成。
    pub async fn delete_user(&self, user_id: Uuid) -> ApplicationResult<()> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("用户不存在: {}", user_id)))?;

        self.user_repository.delete(user_id).await?;

        self.dispatcher
            .publish(&MessageEvent::user_deleted(user_id, user.username.clone()))
            .await?;

        info!(user_id = %user_id, username = %user.username, "用户及其关联数据已删除");
        Ok(())
    }

    /// 标记消息为已读（幂等）
    ///
    /// 只有接收者可以标记；重复标记是无操作的成功。
    pub async fn mark_read(&self, user_id: Uuid, message_id: Uuid) -> ApplicationResult<()> {
        let message = self
            .message_repository
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("消息不存在: {}", message_id)))?;

        if message.receiver_id != user_id {
            return Err(ApplicationError::AccessDenied(
                "只有接收者可以标记消息已读".to_string(),
            ));
        }

        if message.read {
            return Ok(());
        }

        self.message_repository.mark_read(message_id).await?;
        Ok(())
    }

    /// 获取用户的未读消息，按创建时间升序，最小投影
    pub async fn unread_for(&self, user_id: Uuid) -> ApplicationResult<Vec<UnreadMessage>> {
        Ok(self
            .message_repository
            .find_unread_by_receiver(user_id)
            .await?)
    }

    /// 获取某条消息的直接回复
    pub async fn replies_to(&self, message_id: Uuid) -> ApplicationResult<Vec<Message>> {
        self.message_repository
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("消息不存在: {}", message_id)))?;

        Ok(self.message_repository.find_replies(message_id).await?)
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> ApplicationResult<()> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("用户不存在: {}", user_id)))?;
        Ok(())
    }
}
