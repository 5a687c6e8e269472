//! 消息相关的领域事件
//!
//! 事件在存储写入前后由执行写入的代码显式发布，而非依赖框架隐式回调，
//! 以便控制处理顺序和失败传播。

use crate::entities::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 事件类型标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MessageCreated,
    MessageEdited,
    UserDeleted,
}

/// 消息相关的领域事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageEvent {
    /// 消息创建事件
    MessageCreated { message: Message },

    /// 消息编辑事件
    ///
    /// `old` 是更新提交前从存储读出的权威旧版本，`new` 是待提交的新版本。
    MessageEdited { old: Message, new: Message },

    /// 用户删除事件
    UserDeleted { user_id: Uuid, username: String },
}

impl MessageEvent {
    /// 创建消息创建事件
    pub fn message_created(message: Message) -> Self {
        MessageEvent::MessageCreated { message }
    }

    /// 创建消息编辑事件
    pub fn message_edited(old: Message, new: Message) -> Self {
        MessageEvent::MessageEdited { old, new }
    }

    /// 创建用户删除事件
    pub fn user_deleted(user_id: Uuid, username: impl Into<String>) -> Self {
        MessageEvent::UserDeleted {
            user_id,
            username: username.into(),
        }
    }

    /// 获取事件类型
    pub fn kind(&self) -> EventKind {
        match self {
            MessageEvent::MessageCreated { .. } => EventKind::MessageCreated,
            MessageEvent::MessageEdited { .. } => EventKind::MessageEdited,
            MessageEvent::UserDeleted { .. } => EventKind::UserDeleted,
        }
    }

    /// 获取事件类型名称
    pub fn event_type(&self) -> &'static str {
        match self {
            MessageEvent::MessageCreated { .. } => "MessageCreated",
            MessageEvent::MessageEdited { .. } => "MessageEdited",
            MessageEvent::UserDeleted { .. } => "UserDeleted",
        }
    }

    /// 获取触发事件的用户ID
    pub fn user_id(&self) -> Uuid {
        match self {
            MessageEvent::MessageCreated { message } => message.sender_id,
            MessageEvent::MessageEdited { new, .. } => new.sender_id,
            MessageEvent::UserDeleted { user_id, .. } => *user_id,
        }
    }

    /// 获取事件关联的消息ID（如果有）
    pub fn message_id(&self) -> Option<Uuid> {
        match self {
            MessageEvent::MessageCreated { message } => Some(message.id),
            MessageEvent::MessageEdited { new, .. } => Some(new.id),
            MessageEvent::UserDeleted { .. } => None,
        }
    }

    /// 获取事件时间戳
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            MessageEvent::MessageCreated { message } => message.created_at,
            MessageEvent::MessageEdited { new, .. } => new.created_at,
            // 用户删除事件没有明确时间戳，使用当前时间
            MessageEvent::UserDeleted { .. } => Utc::now(),
        }
    }

    /// 检查事件是否涉及特定用户
    pub fn involves_user(&self, user_id: Uuid) -> bool {
        match self {
            MessageEvent::MessageCreated { message } => {
                message.sender_id == user_id || message.receiver_id == user_id
            }
            MessageEvent::MessageEdited { new, .. } => {
                new.sender_id == user_id || new.receiver_id == user_id
            }
            MessageEvent::UserDeleted { user_id: uid, .. } => *uid == user_id,
        }
    }
}
