//! In-memory store - used when no database is configured, and in tests.
//!
//! All tables live behind a single async `RwLock`, so each repository call
//! is atomic, including the post delete that also removes its comments.
//! Note: Data is lost on process restart.

mod repos;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use quill_core::domain::{Comment, Post, ROLE_ADMIN, ROLE_USER, Role, User};

pub use repos::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryRoleRepository,
    InMemoryUserRepository,
};

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) posts: BTreeMap<i64, Post>,
    pub(crate) comments: BTreeMap<i64, Comment>,
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) roles: Vec<Role>,
    sequence: i64,
}

impl Tables {
    /// Ids are unique across all tables, starting at 1.
    pub(crate) fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }
}

/// Shared in-memory tables. Hand out repositories with the `*_repository`
/// methods; they all see the same data.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create an empty store with the built-in roles seeded.
    pub fn new() -> Arc<Self> {
        let mut tables = Tables::default();
        for name in [ROLE_USER, ROLE_ADMIN] {
            let id = tables.next_id();
            tables.roles.push(Role::new(id, name));
        }

        Arc::new(Self {
            tables: RwLock::new(tables),
        })
    }

    pub fn post_repository(self: &Arc<Self>) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.clone())
    }

    pub fn comment_repository(self: &Arc<Self>) -> InMemoryCommentRepository {
        InMemoryCommentRepository::new(self.clone())
    }

    pub fn user_repository(self: &Arc<Self>) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.clone())
    }

    pub fn role_repository(self: &Arc<Self>) -> InMemoryRoleRepository {
        InMemoryRoleRepository::new(self.clone())
    }
}
