use serde::{Deserialize, Serialize};

/// Post entity - a blog post. Comments reference it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Assigned by the repository on insert; `0` until then.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl Post {
    /// Create a post that has not been persisted yet.
    pub fn new(title: String, description: String, content: String) -> Self {
        Self {
            id: 0,
            title,
            description,
            content,
        }
    }
}
