/// Question model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Resource;

/// A question owned by its author
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub question: String,

    /// Email of the creating user, taken from the verified token
    pub author: String,

    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields of a new question
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub question: String,
}

impl Resource for Question {
    type Draft = NewQuestion;

    const NAME: &'static str = "question";

    fn build(id: Uuid, author: String, draft: NewQuestion) -> Self {
        Self {
            id,
            question: draft.question,
            author,
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
