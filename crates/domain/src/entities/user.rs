//! 用户实体定义
//!
//! 本核心只需要用户的最小形态：身份标识和用于通知文案的用户名。
//! 认证、会话等由外部协作方负责。

use crate::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 用户ID
    pub id: Uuid,
    /// 用户名
    pub username: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 创建新用户
    pub fn new(username: impl Into<String>) -> DomainResult<Self> {
        let username = username.into();
        Self::validate_username(&username)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            created_at: Utc::now(),
        })
    }

    /// 创建具有指定ID的用户（用于从存储加载）
    pub fn with_id(
        id: Uuid,
        username: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let username = username.into();
        Self::validate_username(&username)?;

        Ok(Self {
            id,
            username,
            created_at,
        })
    }

    fn validate_username(username: &str) -> DomainResult<()> {
        if username.trim().is_empty() {
            return Err(DomainError::validation_error("username", "用户名不能为空"));
        }
        if username.chars().count() > 150 {
            return Err(DomainError::validation_error(
                "username",
                "用户名不能超过150个字符",
            ));
        }
        Ok(())
    }
}
