mod edit_history_tracker;
mod messaging_service;
mod notification_builder;
mod user_data_cleaner;

pub use edit_history_tracker::EditHistoryTracker;
pub use messaging_service::{MessagingService, MessagingServiceDependencies};
pub use notification_builder::NotificationBuilder;
pub use user_data_cleaner::UserDataCleaner;
