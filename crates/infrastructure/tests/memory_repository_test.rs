//! 内存仓储的级联删除与查询语义测试

use domain::repositories::{
    MessageHistoryRepository, MessageRepository, NotificationRepository, UserRepository,
};
use domain::{Message, MessageHistory, Notification, NotificationKind, User};
use infrastructure::{
    InMemoryMessageHistoryRepository, InMemoryMessageRepository, InMemoryNotificationRepository,
    InMemoryUserRepository, MemoryStore,
};
use std::sync::Arc;
use uuid::Uuid;

struct Repos {
    messages: InMemoryMessageRepository,
    histories: InMemoryMessageHistoryRepository,
    notifications: InMemoryNotificationRepository,
    users: InMemoryUserRepository,
}

fn repos() -> Repos {
    let store = MemoryStore::new();
    Repos {
        messages: InMemoryMessageRepository::new(store.clone()),
        histories: InMemoryMessageHistoryRepository::new(store.clone()),
        notifications: InMemoryNotificationRepository::new(store.clone()),
        users: InMemoryUserRepository::new(store),
    }
}

#[tokio::test]
async fn test_message_delete_cascades_history_and_notifications() {
    let repos = repos();
    let message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Hello").unwrap();
    repos.messages.insert(&message).await.unwrap();

    repos
        .histories
        .insert(&MessageHistory::new(message.id, "Older content"))
        .await
        .unwrap();
    repos
        .notifications
        .insert(&Notification::new(
            message.receiver_id,
            Some(message.id),
            NotificationKind::NewMessage,
            "new message",
        ))
        .await
        .unwrap();

    repos.messages.delete(message.id).await.unwrap();

    assert!(repos
        .messages
        .find_by_id(message.id)
        .await
        .unwrap()
        .is_none());
    // 历史与通知随消息一并删除，无孤儿记录
    assert_eq!(repos.histories.count_by_message(message.id).await.unwrap(), 0);
    assert!(repos
        .notifications
        .find_by_user(message.receiver_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_delete_by_user_covers_sent_and_received() {
    let repos = repos();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let carol = Uuid::new_v4();

    let sent = Message::new(alice, bob, "from alice").unwrap();
    let received = Message::new(carol, alice, "to alice").unwrap();
    let unrelated = Message::new(carol, bob, "unrelated").unwrap();
    for m in [&sent, &received, &unrelated] {
        repos.messages.insert(m).await.unwrap();
    }
    repos
        .histories
        .insert(&MessageHistory::new(sent.id, "draft"))
        .await
        .unwrap();

    let deleted = repos.messages.delete_by_user(alice).await.unwrap();
    assert_eq!(deleted, 2);

    assert!(repos.messages.find_by_id(sent.id).await.unwrap().is_none());
    assert!(repos.messages.find_by_id(received.id).await.unwrap().is_none());
    assert!(repos.messages.find_by_id(unrelated.id).await.unwrap().is_some());
    // 被删消息的历史不残留
    assert_eq!(repos.histories.count_by_message(sent.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unread_query_is_ordered_and_projected() {
    let repos = repos();
    let receiver = Uuid::new_v4();
    let sender = Uuid::new_v4();

    let first = Message::new(sender, receiver, "first").unwrap();
    let second = Message::new(sender, receiver, "second").unwrap();
    let mut already_read = Message::new(sender, receiver, "read").unwrap();
    already_read.mark_read();
    let other_receiver = Message::new(sender, Uuid::new_v4(), "other").unwrap();

    for m in [&first, &second, &already_read, &other_receiver] {
        repos.messages.insert(m).await.unwrap();
    }

    let unread = repos
        .messages
        .find_unread_by_receiver(receiver)
        .await
        .unwrap();

    // 只含未读，按创建时间升序
    assert_eq!(unread.len(), 2);
    assert_eq!(unread[0].id, first.id);
    assert_eq!(unread[1].id, second.id);
    assert_eq!(unread[0].sender_id, sender);
    assert_eq!(unread[0].content, "first");
}

#[tokio::test]
async fn test_mark_read_persists() {
    let repos = repos();
    let message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Hi").unwrap();
    repos.messages.insert(&message).await.unwrap();

    repos.messages.mark_read(message.id).await.unwrap();
    let stored = repos.messages.find_by_id(message.id).await.unwrap().unwrap();
    assert!(stored.read);

    // 重复标记不报错
    repos.messages.mark_read(message.id).await.unwrap();
}

#[tokio::test]
async fn test_update_only_touches_mutable_fields() {
    let repos = repos();
    let message = Message::new(Uuid::new_v4(), Uuid::new_v4(), "Original").unwrap();
    repos.messages.insert(&message).await.unwrap();

    let mut updated = message.clone();
    updated.apply_edit("Changed").unwrap();
    repos.messages.update(&updated).await.unwrap();

    let stored = repos.messages.find_by_id(message.id).await.unwrap().unwrap();
    assert_eq!(stored.content, "Changed");
    assert!(stored.edited);
    assert_eq!(stored.created_at, message.created_at);
    assert_eq!(stored.sender_id, message.sender_id);
}

#[tokio::test]
async fn test_find_replies_returns_direct_replies_in_order() {
    let repos = repos();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let parent = Message::new(alice, bob, "parent").unwrap();
    repos.messages.insert(&parent).await.unwrap();

    let reply1 = Message::new_reply(bob, alice, "reply 1", parent.id).unwrap();
    let reply2 = Message::new_reply(alice, bob, "reply 2", parent.id).unwrap();
    // 孙子回复不属于直接回复
    let nested = Message::new_reply(bob, alice, "nested", reply1.id).unwrap();
    for m in [&reply1, &reply2, &nested] {
        repos.messages.insert(m).await.unwrap();
    }

    let replies = repos.messages.find_replies(parent.id).await.unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].id, reply1.id);
    assert_eq!(replies[1].id, reply2.id);
}

#[tokio::test]
async fn test_user_repository_roundtrip() {
    let repos = repos();
    let user = User::new("alice").unwrap();

    repos.users.insert(&user).await.unwrap();
    assert_eq!(
        repos.users.find_by_id(user.id).await.unwrap().unwrap().username,
        "alice"
    );

    repos.users.delete(user.id).await.unwrap();
    assert!(repos.users.find_by_id(user.id).await.unwrap().is_none());
    assert!(repos.users.delete(user.id).await.is_err());
}
