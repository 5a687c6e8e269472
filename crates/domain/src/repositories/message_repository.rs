//! 消息Repository接口定义

use crate::entities::message::Message;
use crate::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 未读消息的最小投影
///
/// 未读索引查询只返回这几个字段以限制内存占用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreadMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for UnreadMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            created_at: message.created_at,
        }
    }
}

/// 消息Repository接口
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// 创建新消息
    async fn insert(&self, message: &Message) -> DomainResult<()>;

    /// 根据ID查找消息
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Message>>;

    /// 更新消息（仅 content/edited/read 可变）
    async fn update(&self, message: &Message) -> DomainResult<()>;

    /// 标记消息为已读
    async fn mark_read(&self, message_id: Uuid) -> DomainResult<()>;

    /// 删除消息，级联删除其历史记录和关联通知
    async fn delete(&self, message_id: Uuid) -> DomainResult<()>;

    /// 删除用户作为发送者或接收者的全部消息（每条均级联），返回删除数量
    async fn delete_by_user(&self, user_id: Uuid) -> DomainResult<u64>;

    /// 获取接收者的未读消息，按创建时间升序，最小投影
    async fn find_unread_by_receiver(&self, receiver_id: Uuid) -> DomainResult<Vec<UnreadMessage>>;

    /// 获取某条消息的直接回复，按创建时间升序
    async fn find_replies(&self, parent_id: Uuid) -> DomainResult<Vec<Message>>;
}
