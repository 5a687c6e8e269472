//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，处理输入校验、事件发布、
//! 以及对外部适配器（时钟、存储仓储）的抽象。

pub mod access_gate;
pub mod clock;
pub mod dispatcher;
pub mod errors;
pub mod rate_limiter;
pub mod services;

pub use access_gate::{AccessGateError, TimeWindowGate};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::{EventDispatcher, EventHandler};
pub use errors::{ApplicationError, ApplicationResult};
pub use rate_limiter::{ClientIdentity, RateLimitError, SlidingWindowRateLimiter};
pub use services::{
    EditHistoryTracker, MessagingService, MessagingServiceDependencies, NotificationBuilder,
    UserDataCleaner,
};
