/// Persistence seams
///
/// Handlers never talk to a database directly. They go through
/// [`UserStore`] and [`ResourceStore`], bundled in [`Stores`], so the same
/// code runs against PostgreSQL in production and an in-memory backend in
/// tests or when no database is configured.
///
/// # Example
///
/// ```
/// use postboard_shared::store::Stores;
///
/// let stores = Stores::in_memory();
/// assert_eq!(stores.backend_name(), "memory");
/// ```

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Post, Question, Resource, User};

pub mod memory;
pub mod postgres;

pub use memory::{MemoryCollection, MemoryUsers};
pub use postgres::PgStore;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key already exists
    #[error("Duplicate value for {0}")]
    Duplicate(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// User persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user; fails with `Duplicate` if the email is taken
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Looks up a user by exact email match
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Persistence for one resource type
#[async_trait]
pub trait ResourceStore<R: Resource>: Send + Sync {
    async fn insert(&self, resource: &R) -> Result<(), StoreError>;

    /// All stored resources in insertion order
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// Removes the resource; `false` if nothing was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Which backend a [`Stores`] bundle talks to
#[derive(Clone)]
pub enum Backend {
    Memory,
    Postgres(PgPool),
}

/// Store handles shared through application state
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn ResourceStore<Post>>,
    pub questions: Arc<dyn ResourceStore<Question>>,
    pub backend: Backend,
}

impl Stores {
    /// Process-local stores; contents are lost on restart
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUsers::default()),
            posts: Arc::new(MemoryCollection::<Post>::default()),
            questions: Arc::new(MemoryCollection::<Question>::default()),
            backend: Backend::Memory,
        }
    }

    /// PostgreSQL-backed stores sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            users: store.clone(),
            posts: store.clone(),
            questions: store,
            backend: Backend::Postgres(pool),
        }
    }

    /// Short backend label for health output and logs
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Memory => "memory",
            Backend::Postgres(_) => "postgres",
        }
    }
}
