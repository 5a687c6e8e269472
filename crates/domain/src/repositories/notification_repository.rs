//! 通知Repository接口定义

use crate::entities::notification::Notification;
use crate::errors::DomainResult;
use async_trait::async_trait;
use uuid::Uuid;

/// 通知Repository接口
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// 写入一条通知
    async fn insert(&self, notification: &Notification) -> DomainResult<()>;

    /// 获取某个用户的全部通知，按创建时间升序
    async fn find_by_user(&self, user_id: Uuid) -> DomainResult<Vec<Notification>>;

    /// 删除某个用户的全部通知，返回删除数量
    ///
    /// 随消息删除的通知级联由消息存储负责。
    async fn delete_by_user(&self, user_id: Uuid) -> DomainResult<u64>;
}
