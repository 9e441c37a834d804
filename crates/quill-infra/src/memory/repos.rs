use std::sync::Arc;

use async_trait::async_trait;

use quill_core::domain::{Comment, Post, Role, User};
use quill_core::error::RepoError;
use quill_core::paging::{Page, PageRequest};
use quill_core::ports::{
    BaseRepository, CommentRepository, PostRepository, RoleRepository, UserRepository,
};

use super::InMemoryStore;

/// Post repository over the in-memory store.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub(crate) fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn insert(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        post.id = tables.next_id();
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        let slot = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;

        let before = tables.comments.len();
        tables.comments.retain(|_, c| c.post_id != id);
        tracing::debug!(
            post_id = id,
            comments_removed = before - tables.comments.len(),
            "Post removed from memory store"
        );
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_page(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        let tables = self.store.tables.read().await;

        let mut posts: Vec<&Post> = tables.posts.values().collect();
        posts.sort_by(|a, b| request.sort.compare(a, b));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page_size).unwrap_or(usize::MAX);
        let items = posts
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements: tables.posts.len() as u64,
        })
    }
}

/// Comment repository over the in-memory store.
#[derive(Clone)]
pub struct InMemoryCommentRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCommentRepository {
    pub(crate) fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.comments.get(&id).cloned())
    }

    async fn insert(&self, mut comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.store.tables.write().await;
        // Mirrors the foreign key the SQL schema enforces.
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        comment.id = tables.next_id();
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.store.tables.write().await;
        let slot = tables
            .comments
            .get_mut(&comment.id)
            .ok_or(RepoError::NotFound)?;
        *slot = comment.clone();
        Ok(comment)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

/// User repository over the in-memory store.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub(crate) fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        // A username match wins over an email match.
        let by_username = tables.users.values().find(|u| u.username == username);
        Ok(by_username
            .or_else(|| tables.users.values().find(|u| u.email == email))
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn insert(&self, mut user: User) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;
        // Unique columns, checked under the write lock.
        if tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepoError::Constraint("User already exists".to_string()));
        }
        user.id = tables.next_id();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Role lookups over the in-memory store.
#[derive(Clone)]
pub struct InMemoryRoleRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryRoleRepository {
    pub(crate) fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.roles.iter().find(|r| r.name == name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use quill_core::domain::ROLE_USER;
    use quill_core::paging::{PostSort, PostSortField, SortDirection};

    use super::*;

    fn post(title: &str) -> Post {
        Post::new(title.to_string(), "description".to_string(), "content".to_string())
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let store = InMemoryStore::new();
        let repo = store.post_repository();

        let first = repo.insert(post("a")).await.unwrap();
        let second = repo.insert(post("b")).await.unwrap();

        assert!(first.id > 0);
        assert_ne!(first.id, second.id);
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let store = InMemoryStore::new();
        let repo = store.post_repository();
        let mut ghost = post("ghost");
        ghost.id = 404;

        assert!(matches!(repo.update(ghost).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_post_removes_its_comments() {
        let store = InMemoryStore::new();
        let posts = store.post_repository();
        let comments = store.comment_repository();

        let kept = posts.insert(post("kept")).await.unwrap();
        let doomed = posts.insert(post("doomed")).await.unwrap();
        let c = Comment::new(doomed.id, "n".into(), "e@x.io".into(), "body".into());
        let other = Comment::new(kept.id, "n".into(), "e@x.io".into(), "body".into());
        let c = comments.insert(c).await.unwrap();
        comments.insert(other).await.unwrap();

        posts.delete(doomed.id).await.unwrap();

        assert_eq!(comments.find_by_id(c.id).await.unwrap(), None);
        assert_eq!(comments.find_by_post_id(kept.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let store = InMemoryStore::new();
        let comments = store.comment_repository();
        let orphan = Comment::new(77, "n".into(), "e@x.io".into(), "body".into());

        assert!(matches!(
            comments.insert(orphan).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_find_page_sorts_and_slices() {
        let store = InMemoryStore::new();
        let repo = store.post_repository();
        for title in ["b", "d", "a", "c", "e"] {
            repo.insert(post(title)).await.unwrap();
        }
        let sort = PostSort {
            field: PostSortField::Title,
            direction: SortDirection::Desc,
        };

        let page = repo
            .find_page(PageRequest::new(1, 2, sort).unwrap())
            .await
            .unwrap();

        let titles: Vec<_> = page.items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages(), 3);
    }

    #[tokio::test]
    async fn test_roles_are_seeded() {
        let store = InMemoryStore::new();
        let roles = store.role_repository();

        assert!(roles.find_by_name(ROLE_USER).await.unwrap().is_some());
        assert!(roles.find_by_name("ROLE_GUEST").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_unique_columns() {
        let store = InMemoryStore::new();
        let users = store.user_repository();
        let user = User::new(
            "Ann".into(),
            "ann".into(),
            "ann@example.com".into(),
            "hash".into(),
            Vec::new(),
        );

        users.insert(user.clone()).await.unwrap();

        assert!(users.exists_by_username("ann").await.unwrap());
        assert!(users.exists_by_email("ann@example.com").await.unwrap());
        assert!(matches!(
            users.insert(user).await,
            Err(RepoError::Constraint(_))
        ));
        let found = users
            .find_by_username_or_email("ann@example.com", "ann@example.com")
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.username), Some("ann".to_string()));
    }

    #[tokio::test]
    async fn test_username_match_wins_over_email_match() {
        let store = InMemoryStore::new();
        let users = store.user_repository();
        let first = User::new(
            "First".into(),
            "first".into(),
            "shared@example.com".into(),
            "hash".into(),
            Vec::new(),
        );
        let second = User::new(
            "Second".into(),
            "shared@example.com".into(),
            "second@example.com".into(),
            "hash".into(),
            Vec::new(),
        );
        users.insert(first).await.unwrap();
        users.insert(second).await.unwrap();

        let found = users
            .find_by_username_or_email("shared@example.com", "shared@example.com")
            .await
            .unwrap();

        assert_eq!(found.map(|u| u.name), Some("Second".to_string()));
    }
}
