use std::sync::Arc;

use quill_shared::dto::{PostDto, PostResponse};

use crate::domain::Post;
use crate::error::{DomainError, RepoError};
use crate::paging::{PageRequest, PostSort, PostSortField, SortDirection};
use crate::ports::{CommentRepository, PostRepository};

use super::mapper::{page_to_response, post_from_dto, post_to_dto};

/// Post CRUD and listing.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn create_post(&self, dto: PostDto) -> Result<PostDto, DomainError> {
        let post = self.posts.insert(post_from_dto(dto)).await?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post_to_dto(post, Vec::new()))
    }

    /// One page of posts ordered by `sort_by`.
    ///
    /// `sort_dir` is `desc` (any case) for descending; every other value
    /// sorts ascending.
    pub async fn get_all_posts(
        &self,
        page_no: u64,
        page_size: u64,
        sort_by: &str,
        sort_dir: &str,
    ) -> Result<PostResponse, DomainError> {
        let sort = PostSort {
            field: sort_by.parse::<PostSortField>()?,
            direction: SortDirection::parse(sort_dir),
        };
        let request = PageRequest::new(page_no, page_size, sort)?;
        let page = self.posts.find_page(request).await?;

        let mut content = Vec::with_capacity(page.items.len());
        for post in &page.items {
            let comments = self.comments.find_by_post_id(post.id).await?;
            content.push(post_to_dto(post.clone(), comments));
        }

        Ok(page_to_response(&page, content))
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<PostDto, DomainError> {
        let post = self.find_post(id).await?;
        let comments = self.comments.find_by_post_id(id).await?;
        Ok(post_to_dto(post, comments))
    }

    pub async fn update_post(&self, dto: PostDto, id: i64) -> Result<PostDto, DomainError> {
        let mut post = self.find_post(id).await?;
        post.title = dto.title;
        post.description = dto.description;
        post.content = dto.content;

        let updated = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Post", id),
            other => other.into(),
        })?;
        let comments = self.comments.find_by_post_id(id).await?;
        Ok(post_to_dto(updated, comments))
    }

    /// Remove a post together with its comments.
    pub async fn delete_post_by_id(&self, id: i64) -> Result<(), DomainError> {
        self.find_post(id).await?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Post", id),
            other => other.into(),
        })?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    async fn find_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }
}
