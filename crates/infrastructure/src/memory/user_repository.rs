//! 用户仓储的内存实现

use super::MemoryStore;
use async_trait::async_trait;
use domain::repositories::UserRepository;
use domain::{DomainError, DomainResult, User};
use std::sync::Arc;
use uuid::Uuid;

pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        let mut users = self.store.users.write().await;
        if users.contains_key(&user.id) {
            return Err(DomainError::storage(format!("用户ID已存在: {}", user.id)));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let removed = self.store.users.write().await.remove(&id);
        if removed.is_none() {
            return Err(DomainError::resource_not_found("User", id.to_string()));
        }
        Ok(())
    }
}
