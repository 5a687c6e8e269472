//! 基础设施层实现。
//!
//! 提供领域仓储接口的具体实现。当前为内存版，易于替换为数据库实现。

pub mod memory;

pub use memory::{
    InMemoryMessageHistoryRepository, InMemoryMessageRepository, InMemoryNotificationRepository,
    InMemoryUserRepository, MemoryStore,
};
