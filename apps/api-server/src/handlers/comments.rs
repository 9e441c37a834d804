//! Comment handlers, nested under a post.

use actix_web::{HttpResponse, web};

use quill_shared::dto::CommentDto;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CommentDto>,
) -> AppResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate().map_err(AppError::Validation)?;

    let created = state.comments.create_comment(path.into_inner(), dto).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/posts/{post_id}/comments
pub async fn get_comments_by_post_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comments = state
        .comments
        .get_comments_by_post_id(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// GET /api/posts/{post_id}/comments/{comment_id}
pub async fn get_comment_by_id(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state.comments.get_comment_by_id(post_id, comment_id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// PUT /api/posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<CommentDto>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let dto = body.into_inner();
    dto.validate().map_err(AppError::Validation)?;

    let updated = state
        .comments
        .update_comment(post_id, comment_id, dto)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state.comments.delete_comment(post_id, comment_id).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Comment deleted successfully"))
}
