use async_trait::async_trait;

use crate::domain::{Comment, Post, Role, User};
use crate::error::RepoError;
use crate::paging::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. The incoming id is ignored and a fresh one is
    /// assigned.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if it is gone.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Deleting a post also deletes its comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn find_page(&self, request: PageRequest) -> Result<Page<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    /// All comments of a post, ordered by id.
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;
}

/// User repository. Users are loaded together with their roles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, RepoError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepoError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError>;

    /// Persist a new user and its role links.
    async fn insert(&self, user: User) -> Result<User, RepoError>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepoError>;
}
