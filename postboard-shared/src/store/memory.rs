/// In-memory store backend
///
/// Backed by `tokio::sync::RwLock`-guarded vectors. Every operation touches a
/// single document under one lock acquisition, which gives the same
/// per-document atomicity the database backend provides.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ResourceStore, StoreError, UserStore};
use crate::models::{Resource, User};

/// In-memory user table with a unique email constraint
#[derive(Default)]
pub struct MemoryUsers {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

/// In-memory collection of one resource type
pub struct MemoryCollection<R> {
    items: RwLock<Vec<R>>,
}

impl<R> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceStore<R> for MemoryCollection<R> {
    async fn insert(&self, resource: &R) -> Result<(), StoreError> {
        self.items.write().await.push(resource.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|r| r.id() == id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|r| r.id() != id);
        Ok(items.len() != before)
    }
}
