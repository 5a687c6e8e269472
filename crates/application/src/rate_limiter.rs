//! 消息限流器
//!
//! 按客户端身份维护滑动窗口内已接受请求的时间戳序列，
//! 防止消息洪水攻击，保护系统稳定性。状态只存于内存，
//! 进程重启后重置（近似限流，非精确全局配额）。

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use uuid::Uuid;

/// 默认窗口内最大请求数
pub const DEFAULT_MAX_REQUESTS: u32 = 5;
/// 默认窗口大小（秒）
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// 客户端身份：IP地址或已认证用户
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientIdentity {
    Ip(IpAddr),
    User(Uuid),
}

impl std::fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientIdentity::Ip(ip) => write!(f, "ip:{}", ip),
            ClientIdentity::User(id) => write!(f, "user:{}", id),
        }
    }
}

/// 限流错误类型
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit exceeded: {current}/{max} requests per window, retry after {retry_after_secs}s")]
    LimitExceeded {
        current: u32,
        max: u32,
        retry_after_secs: u64,
    },

    #[error("Rate limiter internal error: {0}")]
    Internal(String),
}

/// 滑动窗口限流器
///
/// 对同一身份的并发请求在桶互斥锁下串行处理；粗粒度的全局锁对
/// 本核心的请求量是可接受的。
pub struct SlidingWindowRateLimiter {
    /// 窗口内最大请求数
    max_requests: u32,
    /// 时间窗口大小
    window: Duration,
    /// 身份 → 窗口内已接受请求的时间戳（升序）
    buckets: Mutex<HashMap<ClientIdentity, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowRateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::seconds(window_secs as i64),
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// 从配置创建限流器
    pub fn from_config(config: &config::RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window_secs)
    }

    /// 检查某身份在时刻 `now` 的请求是否放行
    ///
    /// 1. 淘汰所有 `<= now - window` 的时间戳；
    /// 2. 剩余数量达到上限则拒绝，`retry_after` 为最老一条滑出窗口所需时间；
    /// 3. 否则记录 `now` 并放行。
    pub fn check_request(
        &self,
        identity: &ClientIdentity,
        now: DateTime<Utc>,
    ) -> Result<(), RateLimitError> {
        let mut buckets = self
            .buckets
            .lock()
            .map_err(|_| RateLimitError::Internal("lock poisoned".to_string()))?;

        let timestamps = buckets.entry(identity.clone()).or_default();

        let cutoff = now - self.window;
        while timestamps.front().is_some_and(|t| *t <= cutoff) {
            timestamps.pop_front();
        }

        if timestamps.len() as u32 >= self.max_requests {
            // 淘汰后 front > cutoff；上限为 0 时桶为空，窗口永远是满的
            let retry_after = match timestamps.front() {
                Some(oldest) => self.window - (now - *oldest),
                None => self.window,
            };
            return Err(RateLimitError::LimitExceeded {
                current: timestamps.len() as u32,
                max: self.max_requests,
                retry_after_secs: retry_after.num_seconds().max(1) as u64,
            });
        }

        timestamps.push_back(now);
        Ok(())
    }

    /// 获取某身份当前窗口内的请求数（按时刻 `now` 计算）
    pub fn current_count(&self, identity: &ClientIdentity, now: DateTime<Utc>) -> u32 {
        let buckets = match self.buckets.lock() {
            Ok(guard) => guard,
            Err(_) => return 0,
        };
        let cutoff = now - self.window;
        buckets
            .get(identity)
            .map(|ts| ts.iter().filter(|t| **t > cutoff).count() as u32)
            .unwrap_or(0)
    }

    /// 清理整个窗口都已滑出的空桶（防止内存泄漏）
    pub fn cleanup_expired_buckets(&self, now: DateTime<Utc>) {
        if let Ok(mut buckets) = self.buckets.lock() {
            let cutoff = now - self.window;
            buckets.retain(|_, ts| ts.back().is_some_and(|t| *t > cutoff));
        }
    }

    /// 重置某身份的记录（管理员功能）
    pub fn reset_identity(&self, identity: &ClientIdentity) {
        if let Ok(mut buckets) = self.buckets.lock() {
            buckets.remove(identity);
        }
    }
}

impl Default for SlidingWindowRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS)
    }
}
