//! 消息编辑历史Repository接口定义

use crate::entities::message_history::MessageHistory;
use crate::errors::DomainResult;
use async_trait::async_trait;
use uuid::Uuid;

/// 消息编辑历史Repository接口
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MessageHistoryRepository: Send + Sync {
    /// 写入一条历史记录
    async fn insert(&self, history: &MessageHistory) -> DomainResult<()>;

    /// 获取某条消息的全部历史记录，按捕获时间升序
    ///
    /// 升序链条可以按顺序还原消息的所有历史版本。
    async fn find_by_message(&self, message_id: Uuid) -> DomainResult<Vec<MessageHistory>>;

    /// 统计某条消息的历史记录数量
    async fn count_by_message(&self, message_id: Uuid) -> DomainResult<u64>;
}
