//! 领域实体定义

pub mod message;
pub mod message_history;
pub mod notification;
pub mod user;

pub use message::Message;
pub use message_history::MessageHistory;
pub use notification::{Notification, NotificationKind};
pub use user::User;
