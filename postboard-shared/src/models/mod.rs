/// Data models for Postboard
///
/// # Models
///
/// - `user`: registered identities and their password hashes
/// - `post`: posts with embedded comments
/// - `question`: single-field questions
///
/// Posts and questions share the [`Resource`] contract so the repository can
/// create, list and delete both with one implementation.

use serde::Serialize;
use uuid::Uuid;

pub mod post;
pub mod question;
pub mod user;

pub use post::{Comment, NewPost, Post};
pub use question::{NewQuestion, Question};
pub use user::User;

/// An owned, server-identified document
pub trait Resource: Clone + Serialize + Send + Sync + 'static {
    /// Client-supplied fields; never carries an author
    type Draft: Send;

    /// Lower-case singular name used in messages ("post")
    const NAME: &'static str;

    /// Builds the stored form from a draft
    fn build(id: Uuid, author: String, draft: Self::Draft) -> Self;

    /// Server-assigned id
    fn id(&self) -> Uuid;

    /// Email of the owning user
    fn author(&self) -> &str;
}
