//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CommentRepository, PasswordService, PostRepository, RoleRepository, TokenService,
    UserRepository,
};
use quill_core::services::{AuthService, CommentService, PostService};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::{AppConfig, ListingDefaults};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub comments: CommentService,
    pub auth: AuthService,
    pub tokens: Arc<dyn TokenService>,
    pub listing: ListingDefaults,
}

/// The four repositories a running server needs, from one backend.
struct Repositories {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            posts: Arc::new(store.post_repository()),
            comments: Arc::new(store.comment_repository()),
            users: Arc::new(store.user_repository()),
            roles: Arc::new(store.role_repository()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: quill_infra::database::DbConn) -> Self {
        use quill_infra::database::{
            PostgresCommentRepository, PostgresPostRepository, PostgresRoleRepository,
            PostgresUserRepository,
        };

        Self {
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            roles: Arc::new(PostgresRoleRepository::new(db)),
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        #[cfg(feature = "postgres")]
        let repositories = match &config.database {
            Some(db_config) => match quill_infra::database::connect(db_config).await {
                Ok(db) => Repositories::postgres(db),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Repositories::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Repositories::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repositories = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        tracing::info!("Application state initialized");
        Self::from_repositories(repositories, tokens, config.listing.clone())
    }

    /// State over a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory(tokens: Arc<dyn TokenService>, listing: ListingDefaults) -> Self {
        Self::from_repositories(Repositories::in_memory(), tokens, listing)
    }

    fn from_repositories(
        repos: Repositories,
        tokens: Arc<dyn TokenService>,
        listing: ListingDefaults,
    ) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            posts: PostService::new(repos.posts.clone(), repos.comments.clone()),
            comments: CommentService::new(repos.posts, repos.comments),
            auth: AuthService::new(repos.users, repos.roles, passwords, tokens.clone()),
            tokens,
            listing,
        }
    }
}
