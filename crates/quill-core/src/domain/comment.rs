use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - always attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    pub date_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Comment {
    /// Create an unsaved comment for `post_id` with both timestamps set to now.
    pub fn new(post_id: i64, name: String, email: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            post_id,
            name,
            email,
            body,
            date_created: now,
            last_updated: now,
        }
    }

    pub fn belongs_to(&self, post_id: i64) -> bool {
        self.post_id == post_id
    }

    /// Overwrite the user-editable fields. Id and post link stay untouched.
    pub fn apply_edit(&mut self, name: String, email: String, body: String) {
        self.name = name;
        self.email = email;
        self.body = body;
        self.last_updated = Utc::now();
    }
}
