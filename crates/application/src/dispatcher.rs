//! 事件分发器
//!
//! 进程内同步事件分发：按注册顺序依次调用对事件类型感兴趣的处理器。
//! 失败策略为快速失败（fail-fast）：第一个处理器返回错误即中止后续
//! 处理器并将错误上抛给发布方。没有持久化重试队列，处理器必须能
//! 安全应对重复投递。

use crate::errors::ApplicationResult;
use async_trait::async_trait;
use domain::events::{EventKind, MessageEvent};
use std::sync::Arc;
use tracing::{debug, error};

/// 事件处理器接口
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// 处理器名称，用于日志
    fn name(&self) -> &'static str;

    /// 处理器感兴趣的事件类型
    fn interested_in(&self, kind: EventKind) -> bool;

    /// 处理事件
    async fn handle(&self, event: &MessageEvent) -> ApplicationResult<()>;
}

/// 进程内事件分发器
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册事件处理器，分发时按注册顺序调用
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        debug!("注册事件处理器: {}", handler.name());
        self.handlers.push(handler);
    }

    /// 已注册的处理器数量
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// 发布事件
    ///
    /// 在调用线程内同步执行，快速失败：第一个错误中止剩余处理器。
    pub async fn publish(&self, event: &MessageEvent) -> ApplicationResult<()> {
        debug!(event_type = event.event_type(), "发布事件");

        for handler in &self.handlers {
            if !handler.interested_in(event.kind()) {
                continue;
            }
            if let Err(err) = handler.handle(event).await {
                error!(
                    handler = handler.name(),
                    event_type = event.event_type(),
                    error = %err,
                    "事件处理器执行失败，中止后续处理器"
                );
                return Err(err);
            }
        }

        Ok(())
    }
}
