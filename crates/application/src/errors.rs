//! 应用层错误定义
//!
//! 定义应用层特定的错误类型。`RateLimited` 是唯一可重试的错误，
//! 其余均为终态错误。

use domain::errors::DomainError;
use thiserror::Error;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 领域层错误
    #[error("领域错误: {0}")]
    Domain(#[from] DomainError),

    /// 未找到资源
    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 验证错误
    #[error("验证失败: {0}")]
    Validation(String),

    /// 访问被拒绝（时间窗口或角色策略）
    #[error("访问被拒绝: {0}")]
    AccessDenied(String),

    /// 操作被限流，携带重试等待秒数
    #[error("操作被限流，请 {retry_after_secs} 秒后重试")]
    RateLimited { retry_after_secs: u64 },

    /// 存储层错误
    #[error("存储错误: {0}")]
    Storage(String),
}

impl ApplicationError {
    /// 是否为可重试的瞬时错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::RateLimited { .. })
    }
}

/// 应用层结果类型
pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl From<crate::rate_limiter::RateLimitError> for ApplicationError {
    fn from(err: crate::rate_limiter::RateLimitError) -> Self {
        match err {
            crate::rate_limiter::RateLimitError::LimitExceeded {
                retry_after_secs, ..
            } => ApplicationError::RateLimited { retry_after_secs },
            crate::rate_limiter::RateLimitError::Internal(message) => {
                ApplicationError::Storage(message)
            }
        }
    }
}

impl From<crate::access_gate::AccessGateError> for ApplicationError {
    fn from(err: crate::access_gate::AccessGateError) -> Self {
        ApplicationError::AccessDenied(err.to_string())
    }
}

impl From<config::ConfigError> for ApplicationError {
    fn from(err: config::ConfigError) -> Self {
        ApplicationError::Validation(format!("配置错误: {}", err))
    }
}
