//! 消息系统核心领域模型
//!
//! 包含消息、通知、编辑历史等核心实体，以及领域事件和仓储接口定义。

pub mod entities;
pub mod errors;
pub mod events;
pub mod repositories;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use repositories::*;
