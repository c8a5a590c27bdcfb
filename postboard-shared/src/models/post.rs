/// Post model
///
/// Comments are embedded in the post and stored alongside it (a JSONB column
/// in PostgreSQL).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Resource;

/// A comment embedded in a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Email of the commenter
    pub author: String,

    /// Comment body
    pub content: String,
}

/// A post owned by its author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned id
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub title: String,

    pub content: String,

    /// Email of the creating user, taken from the verified token
    pub author: String,

    /// Comments in insertion order
    #[serde(default)]
    pub comments: Vec<Comment>,

    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields of a new post
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl Resource for Post {
    type Draft = NewPost;

    const NAME: &'static str = "post";

    fn build(id: Uuid, author: String, draft: NewPost) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            author,
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn author(&self) -> &str {
        &self.author
    }
}
