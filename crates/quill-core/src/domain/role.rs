use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role granted to every registered user.
pub const ROLE_USER: &str = "ROLE_USER";

/// Role required for post writes.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            date_created: now,
            last_updated: now,
        }
    }
}
