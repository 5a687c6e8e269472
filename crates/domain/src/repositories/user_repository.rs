//! 用户Repository接口定义

use crate::entities::user::User;
use crate::errors::DomainResult;
use async_trait::async_trait;
use uuid::Uuid;

/// 用户Repository接口
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建新用户
    async fn insert(&self, user: &User) -> DomainResult<()>;

    /// 根据ID查找用户
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// 删除用户（关联数据的级联清理由事件处理器负责）
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
