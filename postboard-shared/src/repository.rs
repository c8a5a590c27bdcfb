/// Owner-scoped resource repository
///
/// One generic implementation serves posts and questions. The author of a
/// resource is always the identity passed in by the caller, which handlers
/// take from the verified token, and only that identity may delete it.
///
/// # Example
///
/// ```
/// use postboard_shared::models::{NewQuestion, Question};
/// use postboard_shared::repository::{DeleteError, Repository};
/// use postboard_shared::store::Stores;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stores = Stores::in_memory();
/// let questions = Repository::<Question>::new(stores.questions.clone());
///
/// let q = questions
///     .create("a@example.com", NewQuestion { question: "Why?".into() })
///     .await?;
///
/// let denied = questions.delete_by_id("b@example.com", q.id).await;
/// assert!(matches!(denied, Err(DeleteError::Forbidden)));
///
/// questions.delete_by_id("a@example.com", q.id).await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use uuid::Uuid;

use crate::models::Resource;
use crate::store::{ResourceStore, StoreError};

/// Outcome of a failed authorized delete
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// No resource with that id
    #[error("Resource not found")]
    NotFound,

    /// Resource exists but belongs to someone else
    #[error("Requester is not the author")]
    Forbidden,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create, list and owner-checked delete over a [`ResourceStore`]
pub struct Repository<R: Resource> {
    store: Arc<dyn ResourceStore<R>>,
}

impl<R: Resource> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<R: Resource> Repository<R> {
    pub fn new(store: Arc<dyn ResourceStore<R>>) -> Self {
        Self { store }
    }

    /// Stores a new resource owned by `owner`
    ///
    /// The id is generated here; the author comes only from `owner`.
    pub async fn create(&self, owner: &str, draft: R::Draft) -> Result<R, StoreError> {
        let resource = R::build(Uuid::new_v4(), owner.to_string(), draft);
        self.store.insert(&resource).await?;

        tracing::debug!(kind = R::NAME, id = %resource.id(), "Resource created");
        Ok(resource)
    }

    /// Every stored resource, unfiltered
    pub async fn list_all(&self) -> Result<Vec<R>, StoreError> {
        self.store.list().await
    }

    /// Deletes `id` if and only if `requester` is its author
    ///
    /// # Errors
    ///
    /// - `NotFound` if no such resource exists (including one already deleted)
    /// - `Forbidden` if it exists but `requester` is not the author; the
    ///   resource is left untouched
    pub async fn delete_by_id(&self, requester: &str, id: Uuid) -> Result<(), DeleteError> {
        let resource = self.store.find_by_id(id).await?.ok_or(DeleteError::NotFound)?;

        if resource.author() != requester {
            tracing::debug!(kind = R::NAME, %id, "Delete refused: requester is not the author");
            return Err(DeleteError::Forbidden);
        }

        // Lost a race with a concurrent delete of the same resource.
        if !self.store.delete_by_id(id).await? {
            return Err(DeleteError::NotFound);
        }

        tracing::debug!(kind = R::NAME, %id, "Resource deleted");
        Ok(())
    }
}
