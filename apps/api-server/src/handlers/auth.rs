//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{LoginDto, RegisterDto};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login (alias /api/auth/signin)
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginDto>,
) -> AppResult<HttpResponse> {
    let response = state.auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/auth/register (alias /api/auth/signup)
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterDto>,
) -> AppResult<HttpResponse> {
    let dto = body.into_inner();
    dto.validate().map_err(AppError::Validation)?;

    let username = dto.username.clone();
    let message = state.auth.register(dto).await?;
    tracing::info!(%username, "User registered");

    Ok(HttpResponse::Created()
        .content_type("text/plain; charset=utf-8")
        .body(message))
}
