//! 消息实体定义
//!
//! 用户之间的私信消息，支持通过 parent_id 形成回复线程。

use crate::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息内容最大长度（字符数）
const MAX_CONTENT_LENGTH: usize = 10_000;

/// 消息实体
///
/// 创建后除 `content`、`edited`、`read` 之外的字段不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// 消息唯一ID
    pub id: Uuid,
    /// 发送者ID
    pub sender_id: Uuid,
    /// 接收者ID
    pub receiver_id: Uuid,
    /// 消息内容
    pub content: String,
    /// 被回复的消息ID（可选，形成线程）
    pub parent_id: Option<Uuid>,
    /// 是否被编辑过
    pub edited: bool,
    /// 接收者是否已读
    pub read: bool,
    /// 发送时间
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// 创建新消息
    pub fn new(sender_id: Uuid, receiver_id: Uuid, content: impl Into<String>) -> DomainResult<Self> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content,
            parent_id: None,
            edited: false,
            read: false,
            created_at: Utc::now(),
        })
    }

    /// 创建新的回复消息
    pub fn new_reply(
        sender_id: Uuid,
        receiver_id: Uuid,
        content: impl Into<String>,
        parent_id: Uuid,
    ) -> DomainResult<Self> {
        let mut message = Self::new(sender_id, receiver_id, content)?;
        message.parent_id = Some(parent_id);
        Ok(message)
    }

    /// 创建具有指定字段的消息（用于从存储加载）
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: Uuid,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: impl Into<String>,
        parent_id: Option<Uuid>,
        edited: bool,
        read: bool,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id,
            sender_id,
            receiver_id,
            content,
            parent_id,
            edited,
            read,
            created_at,
        })
    }

    /// 应用一次编辑
    ///
    /// 内容未变化时不做任何修改，返回 `false`；内容变化时更新内容、
    /// 置位 `edited` 标志并返回 `true`。
    pub fn apply_edit(&mut self, new_content: impl Into<String>) -> DomainResult<bool> {
        let new_content = new_content.into();
        Self::validate_content(&new_content)?;

        if new_content == self.content {
            return Ok(false);
        }

        self.content = new_content;
        self.edited = true;
        Ok(true)
    }

    /// 标记为已读（幂等）
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// 检查是否为回复消息
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// 获取消息的简短预览（用于通知等）
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            self.content.clone()
        } else {
            let truncated: String = self.content.chars().take(max_chars).collect();
            format!("{}...", truncated)
        }
    }

    /// 验证消息内容
    pub fn validate_content(content: &str) -> DomainResult<()> {
        if content.trim().is_empty() {
            return Err(DomainError::validation_error("content", "消息内容不能为空"));
        }

        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(DomainError::validation_error(
                "content",
                "消息内容不能超过10000个字符",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let sender_id = Uuid::new_v4();
        let receiver_id = Uuid::new_v4();
        let message = Message::new(sender_id, receiver_id, "Hello World").unwrap();

        assert_eq!(message.sender_id, sender_id);
        assert_eq!(message.receiver_id, receiver_id);
        assert_eq!(message.content, "Hello World");
        assert!(message.parent_id.is_none());
        assert!(!message.edited);
        assert!(!message.read);
    }

    #[test]
    fn test_content_validation() {
        let sender_id = Uuid::new_v4();
        let receiver_id = Uuid::new_v4();

        // 有效内容
        assert!(Message::new(sender_id, receiver_id, "Valid message").is_ok());
        assert!(Message::new(sender_id, receiver_id, "A".repeat(1000)).is_ok());

        // 无效内容
        assert!(Message::new(sender_id, receiver_id, "").is_err());
        assert!(Message::new(sender_id, receiver_id, "   ").is_err());
        assert!(Message::new(sender_id, receiver_id, "A".repeat(10_001)).is_err());
    }

    #[test]
    fn test_apply_edit_changes_content_and_flag() {
        let mut message =
            Message::new(Uuid::new_v4(), Uuid::new_v4(), "Original content").unwrap();

        let changed = message.apply_edit("Updated content").unwrap();
        assert!(changed);
        assert_eq!(message.content, "Updated content");
        assert!(message.edited);
    }

    #[test]
    fn test_apply_edit_unchanged_content_is_noop() {
        let mut message =
            Message::new(Uuid::new_v4(), Uuid::new_v4(), "Same content").unwrap();

        let changed = message.apply_edit("Same content").unwrap();
        assert!(!changed);
        // 内容未变化时 edited 标志保持为 false
        assert!(!message.edited);
    }

    #[test]
    fn test_apply_edit_rejects_invalid_content() {
        let mut message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Content").unwrap();
        assert!(message.apply_edit("").is_err());
        assert_eq!(message.content, "Content");
        assert!(!message.edited);
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Hi").unwrap();

        message.mark_read();
        assert!(message.read);

        // 再次标记不报错，状态不变
        message.mark_read();
        assert!(message.read);
    }

    #[test]
    fn test_reply_message() {
        let parent = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Parent").unwrap();
        let reply = Message::new_reply(
            parent.receiver_id,
            parent.sender_id,
            "Reply to parent",
            parent.id,
        )
        .unwrap();

        assert!(reply.is_reply());
        assert_eq!(reply.parent_id, Some(parent.id));
    }

    #[test]
    fn test_message_preview() {
        let message = Message::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "This is a long message content",
        )
        .unwrap();

        assert_eq!(message.preview(10), "This is a ...");
        assert_eq!(message.preview(100), "This is a long message content");
    }

    #[test]
    fn test_message_serialization() {
        let message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Test message").unwrap();

        let json = serde_json::to_string(&message).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(message, deserialized);
    }
}
