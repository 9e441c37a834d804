use std::sync::Arc;

use quill_shared::dto::CommentDto;

use crate::domain::Comment;
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository};

use super::mapper::{comment_from_dto, comment_to_dto};

/// Comments nested under posts.
///
/// Every operation addressing a single comment checks, in order: the post
/// exists, the comment exists, the comment belongs to the post.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn create_comment(
        &self,
        post_id: i64,
        dto: CommentDto,
    ) -> Result<CommentDto, DomainError> {
        self.ensure_post(post_id).await?;
        let comment = self.comments.insert(comment_from_dto(post_id, dto)).await?;
        tracing::info!(post_id, comment_id = comment.id, "Comment created");
        Ok(comment_to_dto(comment))
    }

    pub async fn get_comments_by_post_id(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentDto>, DomainError> {
        let comments = self.comments.find_by_post_id(post_id).await?;
        Ok(comments.into_iter().map(comment_to_dto).collect())
    }

    pub async fn get_comment_by_id(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<CommentDto, DomainError> {
        let comment = self.find_owned(post_id, comment_id).await?;
        Ok(comment_to_dto(comment))
    }

    pub async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        dto: CommentDto,
    ) -> Result<CommentDto, DomainError> {
        let mut comment = self.find_owned(post_id, comment_id).await?;
        comment.apply_edit(dto.name, dto.email, dto.body);

        let updated = self.comments.update(comment).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Comment", comment_id),
            other => other.into(),
        })?;
        Ok(comment_to_dto(updated))
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<(), DomainError> {
        self.find_owned(post_id, comment_id).await?;
        self.comments.delete(comment_id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found("Comment", comment_id),
            other => other.into(),
        })?;
        tracing::info!(post_id, comment_id, "Comment deleted");
        Ok(())
    }

    async fn ensure_post(&self, post_id: i64) -> Result<(), DomainError> {
        match self.posts.find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Post", post_id)),
        }
    }

    async fn find_owned(&self, post_id: i64, comment_id: i64) -> Result<Comment, DomainError> {
        self.ensure_post(post_id).await?;

        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;

        if !comment.belongs_to(post_id) {
            return Err(DomainError::Mismatch(
                "Comment does not belong to post".to_string(),
            ));
        }
        Ok(comment)
    }
}
