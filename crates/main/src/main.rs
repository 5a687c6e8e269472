//! 主应用程序入口
//!
//! 组装内存仓储、事件分发器和请求守卫，跑一遍完整的消息流程演示。

use application::{
    ClientIdentity, Clock, EditHistoryTracker, EventDispatcher, MessagingService,
    MessagingServiceDependencies, NotificationBuilder, SlidingWindowRateLimiter, SystemClock,
    TimeWindowGate, UserDataCleaner,
};
use config::AppConfig;
use domain::repositories::{NotificationRepository, UserRepository};
use domain::User;
use infrastructure::{
    InMemoryMessageHistoryRepository, InMemoryMessageRepository, InMemoryNotificationRepository,
    InMemoryUserRepository, MemoryStore,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 读取环境变量配置
    let config = AppConfig::from_env()?;
    tracing::info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        access_start = %config.access_window.start,
        access_end = %config.access_window.end,
        "配置加载完成"
    );

    // 创建内存仓储实例
    let store = MemoryStore::new();
    let message_repository = Arc::new(InMemoryMessageRepository::new(store.clone()));
    let history_repository = Arc::new(InMemoryMessageHistoryRepository::new(store.clone()));
    let notification_repository = Arc::new(InMemoryNotificationRepository::new(store.clone()));
    let user_repository = Arc::new(InMemoryUserRepository::new(store));

    // 注册事件处理器：历史追踪在前，通知构建随后，用户清理最后
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(EditHistoryTracker::new(history_repository.clone())));
    dispatcher.register(Arc::new(NotificationBuilder::new(
        notification_repository.clone(),
        message_repository.clone(),
        user_repository.clone(),
    )));
    dispatcher.register(Arc::new(UserDataCleaner::new(
        message_repository.clone(),
        notification_repository.clone(),
    )));

    let service = MessagingService::new(MessagingServiceDependencies {
        message_repository,
        user_repository: user_repository.clone(),
        dispatcher: Arc::new(dispatcher),
    });

    // 请求守卫：时间窗口 + 滑动窗口限流
    let gate = TimeWindowGate::from_config(&config.access_window)?;
    let limiter = SlidingWindowRateLimiter::from_config(&config.rate_limit);
    let clock = SystemClock;

    // 演示场景：注册两个用户，发送、回复、编辑并查看未读
    let alice = User::new("alice")?;
    let bob = User::new("bob")?;
    user_repository.insert(&alice).await?;
    user_repository.insert(&bob).await?;
    tracing::info!(alice = %alice.id, bob = %bob.id, "演示用户已创建");

    let identity = ClientIdentity::User(alice.id);
    let now = clock.now();
    if let Err(e) = gate.check_datetime(now) {
        tracing::warn!("当前时间不在访问窗口内: {}", e);
        return Ok(());
    }
    limiter.check_request(&identity, now)?;

    let message = service
        .send_message(alice.id, bob.id, "Hello Bob, welcome aboard!", None)
        .await?;
    tracing::info!(message_id = %message.id, "消息已发送");

    limiter.check_request(&ClientIdentity::User(bob.id), clock.now())?;
    let reply = service
        .send_message(bob.id, alice.id, "Thanks Alice!", Some(message.id))
        .await?;
    tracing::info!(reply_id = %reply.id, parent_id = %message.id, "回复已发送");

    let edited = service
        .edit_message(message.id, "Hello Bob, welcome to the team!")
        .await?;
    tracing::info!(message_id = %edited.id, edited = edited.edited, "消息已编辑");

    for unread in service.unread_for(bob.id).await? {
        tracing::info!(
            message_id = %unread.id,
            sender_id = %unread.sender_id,
            content = %unread.content,
            "bob 的未读消息"
        );
    }
    service.mark_read(bob.id, message.id).await?;

    for notification in notification_repository.find_by_user(alice.id).await? {
        tracing::info!(kind = %notification.kind, content = %notification.content, "alice 的通知");
    }

    // 清理：删除用户并级联清除其消息、历史和通知
    service.delete_user(bob.id).await?;
    tracing::info!("演示结束，bob 及其关联数据已删除");

    Ok(())
}
