//! 通知实体定义
//!
//! 通知只能由通知构建器对领域事件作出反应时创建。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// 收到新消息
    NewMessage,
    /// 消息被编辑
    Edit,
    /// 消息被回复
    Reply,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::NewMessage => write!(f, "new_message"),
            NotificationKind::Edit => write!(f, "edit"),
            NotificationKind::Reply => write!(f, "reply"),
        }
    }
}

/// 通知实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// 通知ID
    pub id: Uuid,
    /// 接收通知的用户ID
    pub user_id: Uuid,
    /// 关联的消息ID（可选）
    pub message_id: Option<Uuid>,
    /// 通知类型
    pub kind: NotificationKind,
    /// 通知内容
    pub content: String,
    /// 是否已读
    pub is_read: bool,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// 创建新通知
    pub fn new(
        user_id: Uuid,
        message_id: Option<Uuid>,
        kind: NotificationKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            message_id,
            kind,
            content: content.into(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// 标记为已读（幂等）
    pub fn mark_as_read(&mut self) {
        self.is_read = true;
    }
}
