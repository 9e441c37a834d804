use std::sync::Arc;

use quill_shared::dto::{JwtAuthResponse, LoginDto, RegisterDto};

use crate::domain::{ROLE_ADMIN, ROLE_USER, Role, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, RoleRepository, TokenService, UserRepository};

/// Login and registration.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            roles,
            passwords,
            tokens,
        }
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn login(&self, dto: LoginDto) -> Result<JwtAuthResponse, DomainError> {
        let user = self
            .users
            .find_by_username_or_email(&dto.username_or_email, &dto.username_or_email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !self.passwords.verify(&dto.password, &user.password_hash)? {
            tracing::warn!(user_id = user.id, "Rejected login: bad password");
            return Err(DomainError::Unauthorized);
        }

        let access_token = self
            .tokens
            .generate_token(user.id, &user.username, user.role_names())?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(JwtAuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.expiration_seconds().max(0) as u64,
        })
    }

    pub async fn register(&self, dto: RegisterDto) -> Result<String, DomainError> {
        self.ensure_available(&dto.username, &dto.email).await?;

        let roles = vec![self.role(ROLE_USER).await?];
        let user = self.create_user(dto, roles).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok("User registered successfully.".to_string())
    }

    /// Create an administrator account unless the username is already taken.
    ///
    /// Returns `true` when a user was created.
    pub async fn ensure_admin(&self, dto: RegisterDto) -> Result<bool, DomainError> {
        if self.users.exists_by_username(&dto.username).await? {
            return Ok(false);
        }
        if self.users.exists_by_email(&dto.email).await? {
            return Err(DomainError::Duplicate("Email already exists.".to_string()));
        }

        let roles = vec![self.role(ROLE_USER).await?, self.role(ROLE_ADMIN).await?];
        let user = self.create_user(dto, roles).await?;

        tracing::info!(user_id = user.id, username = %user.username, "Administrator created");
        Ok(true)
    }

    async fn ensure_available(&self, username: &str, email: &str) -> Result<(), DomainError> {
        if self.users.exists_by_username(username).await? {
            return Err(DomainError::Duplicate(
                "Username already exists.".to_string(),
            ));
        }
        if self.users.exists_by_email(email).await? {
            return Err(DomainError::Duplicate("Email already exists.".to_string()));
        }
        Ok(())
    }

    async fn role(&self, name: &str) -> Result<Role, DomainError> {
        self.roles
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Role {name} is not configured")))
    }

    async fn create_user(&self, dto: RegisterDto, roles: Vec<Role>) -> Result<User, DomainError> {
        let password_hash = self.passwords.hash(&dto.password)?;
        let user = User::new(dto.name, dto.username, dto.email, password_hash, roles);
        Ok(self.users.insert(user).await?)
    }
}
