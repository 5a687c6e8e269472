//! 统一配置中心
//!
//! 提供应用的全局配置管理，包括：
//! - 限流窗口与上限
//! - 访问时段

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// 配置错误类型
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无效的时间配置 {name}={value}: {message}")]
    InvalidTime {
        name: String,
        value: String,
        message: String,
    },

    #[error("无效的数值配置 {name}={value}")]
    InvalidNumber { name: String, value: String },
}

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 限流配置
    pub rate_limit: RateLimitConfig,
    /// 访问时段配置
    pub access_window: AccessWindowConfig,
}

/// 限流配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// 窗口内最大请求数
    pub max_requests: u32,
    /// 窗口大小（秒）
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_secs: 60,
        }
    }
}

/// 访问时段配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessWindowConfig {
    /// 时段起点（含）
    pub start: NaiveTime,
    /// 时段终点（含）
    pub end: NaiveTime,
}

impl Default for AccessWindowConfig {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            access_window: AccessWindowConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置，缺失的变量使用默认值
    ///
    /// 可用变量：RATE_LIMIT_MAX_REQUESTS、RATE_LIMIT_WINDOW_SECS、
    /// ACCESS_WINDOW_START、ACCESS_WINDOW_END（格式 HH:MM:SS）。
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            rate_limit: RateLimitConfig {
                max_requests: parse_number(
                    "RATE_LIMIT_MAX_REQUESTS",
                    defaults.rate_limit.max_requests,
                )?,
                window_secs: parse_number(
                    "RATE_LIMIT_WINDOW_SECS",
                    defaults.rate_limit.window_secs,
                )?,
            },
            access_window: AccessWindowConfig {
                start: parse_time("ACCESS_WINDOW_START", defaults.access_window.start)?,
                end: parse_time("ACCESS_WINDOW_END", defaults.access_window.end)?,
            },
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_time(name: &str, default: NaiveTime) -> Result<NaiveTime, ConfigError> {
    match env::var(name) {
        Ok(value) => {
            NaiveTime::parse_from_str(&value, "%H:%M:%S").map_err(|err| ConfigError::InvalidTime {
                name: name.to_string(),
                value,
                message: err.to_string(),
            })
        }
        Err(_) => Ok(default),
    }
}
