//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as seen by API clients.
///
/// `id` is ignored on input; it is assigned by the store and echoed back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

impl PostDto {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Check the user-editable fields, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.title.trim().chars().count() < 2 {
            errors.push("Post title should have at least 2 characters".to_string());
        }
        if self.description.trim().chars().count() < 10 {
            errors.push("Post description should have at least 10 characters".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("Post content should not be empty".to_string());
        }
        into_result(errors)
    }
}

/// One page of posts plus paging metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub content: Vec<PostDto>,
    pub page_no: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

/// A comment attached to a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CommentDto {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name should not be empty".to_string());
        }
        if !is_email(&self.email) {
            errors.push("Email should be a valid address".to_string());
        }
        if self.body.trim().chars().count() < 10 {
            errors.push("Comment body should have at least 10 characters".to_string());
        }
        into_result(errors)
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    pub username_or_email: String,
    pub password: String,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDto {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterDto {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name should not be empty".to_string());
        }
        if self.username.trim().is_empty() {
            errors.push("Username should not be empty".to_string());
        } else if self.username.contains('@') {
            errors.push("Username must not contain '@'".to_string());
        }
        if !is_email(&self.email) {
            errors.push("Email should be a valid address".to_string());
        }
        if self.password.len() < 8 {
            errors.push("Password must be at least 8 characters".to_string());
        }
        into_result(errors)
    }
}

/// Response containing the issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtAuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

fn into_result(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_dto_uses_camel_case_and_default_id() {
        let dto: PostDto = serde_json::from_str(
            r#"{"title":"Hello","description":"A long description","content":"Body"}"#,
        )
        .unwrap();

        assert_eq!(dto.id, 0);
        assert!(dto.comments.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_post_dto_validation_collects_all_errors() {
        let dto = PostDto::new("a", "short", " ");

        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_comment_dto_rejects_bad_email() {
        let dto = CommentDto::new("Ann", "not-an-email", "This is a fine comment");

        let errors = dto.validate().unwrap_err();
        assert_eq!(errors, vec!["Email should be a valid address".to_string()]);
    }

    #[test]
    fn test_comment_dto_skips_missing_timestamps() {
        let dto = CommentDto::new("Ann", "ann@example.com", "This is a fine comment");
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("dateCreated").is_none());
        assert_eq!(json["email"], "ann@example.com");
    }

    #[test]
    fn test_post_response_field_names() {
        let json = serde_json::to_value(PostResponse {
            last: true,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(json["last"], true);
        assert_eq!(json["totalElements"], 0);
        assert_eq!(json["pageNo"], 0);
    }

    #[test]
    fn test_login_dto_field_names() {
        let dto: LoginDto =
            serde_json::from_str(r#"{"usernameOrEmail":"ann","password":"secret"}"#).unwrap();

        assert_eq!(dto.username_or_email, "ann");
    }

    #[test]
    fn test_register_dto_short_password() {
        let dto = RegisterDto {
            name: "Ann".to_string(),
            username: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "short".to_string(),
        };

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_register_dto_rejects_at_in_username() {
        let dto = RegisterDto {
            name: "Ann".to_string(),
            username: "ann@example.com".to_string(),
            email: "ann@example.com".to_string(),
            password: "password123".to_string(),
        };

        assert_eq!(
            dto.validate().unwrap_err(),
            vec!["Username must not contain '@'".to_string()]
        );
    }
}
