//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;


use actix_web::{error, web};

use quill_core::domain::ROLE_ADMIN;

use crate::middleware::auth::RequireRole;
use crate::middleware::error::AppError;

/// Malformed bodies, queries and paths become 400s with the standard body.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::BadRequest(err.to_string()))
    }));
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/signin", web::post().to(auth::login))
                    .route("/register", web::post().to(auth::register))
                    .route("/signup", web::post().to(auth::register)),
            )
            .service(
                web::scope("/posts")
                    // Reads are public, writes need ROLE_ADMIN
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::get_all_posts))
                            .route(web::post().to(posts::create_post))
                            .wrap(RequireRole::new(ROLE_ADMIN).for_writes()),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::get_post_by_id))
                            .route(web::put().to(posts::update_post))
                            .route(web::delete().to(posts::delete_post))
                            .wrap(RequireRole::new(ROLE_ADMIN).for_writes()),
                    )
                    .service(
                        web::resource("/{post_id}/comments")
                            .route(web::get().to(comments::get_comments_by_post_id))
                            .route(web::post().to(comments::create_comment)),
                    )
                    .service(
                        web::resource("/{post_id}/comments/{comment_id}")
                            .route(web::get().to(comments::get_comment_by_id))
                            .route(web::put().to(comments::update_comment))
                            .route(web::delete().to(comments::delete_comment)),
                    ),
            ),
    );
}
