use serde::{Deserialize, Serialize};

use super::Role;

/// User entity - an account that can log in.
///
/// Only the password hash is ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

impl User {
    /// Create an unsaved user; the repository assigns the id.
    pub fn new(
        name: String,
        username: String,
        email: String,
        password_hash: String,
        roles: Vec<Role>,
    ) -> Self {
        Self {
            id: 0,
            name,
            username,
            email,
            password_hash,
            roles,
        }
    }

    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.name == role)
    }
}
