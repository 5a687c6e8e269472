//! 按时段限制访问的门卫
//!
//! 无状态谓词：给定当前墙钟时间和允许的时段 [start, end]，
//! 时段外的请求全部拒绝。边界时刻（恰好 start 或恰好 end）放行。

use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;

/// 访问门卫错误类型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccessGateError {
    /// 当前时刻在允许时段之外
    #[error("访问时段已关闭: 仅允许 {start} 至 {end}，当前 {now}")]
    WindowClosed {
        start: NaiveTime,
        end: NaiveTime,
        now: NaiveTime,
    },

    /// 无效的时段配置
    #[error("无效的访问时段: start {start} 晚于 end {end}")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },
}

/// 按时段限制访问的门卫
#[derive(Debug, Clone)]
pub struct TimeWindowGate {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindowGate {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, AccessGateError> {
        if start > end {
            return Err(AccessGateError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// 从配置创建门卫
    pub fn from_config(config: &config::AccessWindowConfig) -> Result<Self, AccessGateError> {
        Self::new(config.start, config.end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// 检查某个墙钟时刻是否在允许时段内，边界包含
    pub fn check(&self, now: NaiveTime) -> Result<(), AccessGateError> {
        if now < self.start || now > self.end {
            return Err(AccessGateError::WindowClosed {
                start: self.start,
                end: self.end,
                now,
            });
        }
        Ok(())
    }

    /// 检查一个 UTC 时间点的时刻部分
    pub fn check_datetime(&self, now: DateTime<Utc>) -> Result<(), AccessGateError> {
        self.check(now.time())
    }
}

impl Default for TimeWindowGate {
    fn default() -> Self {
        // 默认 09:00–18:00，常量合法
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }
}
