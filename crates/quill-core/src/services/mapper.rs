//! Explicit DTO <-> entity conversions.

use quill_shared::dto::{CommentDto, PostDto, PostResponse};

use crate::domain::{Comment, Post};
use crate::paging::Page;

pub(crate) fn post_to_dto(post: Post, comments: Vec<Comment>) -> PostDto {
    PostDto {
        id: post.id,
        title: post.title,
        description: post.description,
        content: post.content,
        comments: comments.into_iter().map(comment_to_dto).collect(),
    }
}

pub(crate) fn post_from_dto(dto: PostDto) -> Post {
    Post::new(dto.title, dto.description, dto.content)
}

pub(crate) fn comment_to_dto(comment: Comment) -> CommentDto {
    CommentDto {
        id: comment.id,
        name: comment.name,
        email: comment.email,
        body: comment.body,
        date_created: Some(comment.date_created),
        last_updated: Some(comment.last_updated),
    }
}

pub(crate) fn comment_from_dto(post_id: i64, dto: CommentDto) -> Comment {
    Comment::new(post_id, dto.name, dto.email, dto.body)
}

pub(crate) fn page_to_response(page: &Page<Post>, content: Vec<PostDto>) -> PostResponse {
    PostResponse {
        content,
        page_no: page.page_no,
        page_size: page.page_size,
        total_elements: page.total_elements,
        total_pages: page.total_pages(),
        last: page.is_last(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_from_dto_drops_client_id() {
        let mut dto = PostDto::new("Title", "Description!", "Content");
        dto.id = 99;

        let post = post_from_dto(dto);

        assert_eq!(post.id, 0);
        assert_eq!(post.title, "Title");
    }

    #[test]
    fn test_comment_round_trip_fields() {
        let mut comment = Comment::new(4, "Ann".into(), "ann@example.com".into(), "Nice".into());
        comment.id = 12;
        let created = comment.date_created;

        let dto = comment_to_dto(comment);

        assert_eq!(dto.id, 12);
        assert_eq!(dto.name, "Ann");
        assert_eq!(dto.date_created, Some(created));
    }
}
