//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_shared::dto::PostDto;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Query string of `GET /api/posts`; absent values fall back to the
/// configured listing defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub page_no: Option<u64>,
    pub page_size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

/// GET /api/posts
pub async fn get_all_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let defaults = &state.listing;

    let page = state
        .posts
        .get_all_posts(
            query.page_no.unwrap_or(defaults.page_no),
            query.page_size.unwrap_or(defaults.page_size),
            query.sort_by.as_deref().unwrap_or(&defaults.sort_by),
            query.sort_dir.as_deref().unwrap_or(&defaults.sort_dir),
        )
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/posts/{id}
pub async fn get_post_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostDto>,
) -> AppResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate().map_err(AppError::Validation)?;

    let created = state.posts.create_post(dto).await?;
    tracing::info!(
        post_id = created.id,
        user_id = identity.user_id,
        by = %identity.username,
        "Post created"
    );

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<PostDto>,
) -> AppResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate().map_err(AppError::Validation)?;

    let updated = state.posts.update_post(dto, path.into_inner()).await?;
    tracing::info!(post_id = updated.id, by = %identity.username, "Post updated");

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete_post_by_id(id).await?;
    tracing::info!(post_id = id, by = %identity.username, "Post deleted");

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Post entity deleted successfully."))
}
