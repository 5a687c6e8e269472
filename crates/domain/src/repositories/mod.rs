//! 仓储接口定义
//!
//! 存储协作方通过这些接口接入，具体实现位于 infrastructure 层。

pub mod message_history_repository;
pub mod message_repository;
pub mod notification_repository;
pub mod user_repository;

pub use message_history_repository::MessageHistoryRepository;
pub use message_repository::{MessageRepository, UnreadMessage};
pub use notification_repository::NotificationRepository;
pub use user_repository::UserRepository;

#[cfg(feature = "testing")]
pub use message_history_repository::MockMessageHistoryRepository;
#[cfg(feature = "testing")]
pub use message_repository::MockMessageRepository;
#[cfg(feature = "testing")]
pub use notification_repository::MockNotificationRepository;
#[cfg(feature = "testing")]
pub use user_repository::MockUserRepository;
