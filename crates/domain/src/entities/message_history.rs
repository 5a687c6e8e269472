//! 消息编辑历史实体定义
//!
//! 每次内容变化的编辑恰好产生一条历史记录，记录编辑前的内容，创建后不再修改。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息编辑历史记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageHistory {
    /// 历史记录ID
    pub id: Uuid,
    /// 所属消息ID
    pub message_id: Uuid,
    /// 编辑前的内容快照
    pub old_content: String,
    /// 快照捕获时间
    pub edited_at: DateTime<Utc>,
}

impl MessageHistory {
    /// 创建新的历史记录
    pub fn new(message_id: Uuid, old_content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id,
            old_content: old_content.into(),
            edited_at: Utc::now(),
        }
    }

    /// 创建具有指定字段的历史记录（用于从存储加载）
    pub fn with_id(
        id: Uuid,
        message_id: Uuid,
        old_content: impl Into<String>,
        edited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            message_id,
            old_content: old_content.into(),
            edited_at,
        }
    }
}
