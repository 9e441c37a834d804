//! Services - business rules on top of the repository ports.
//!
//! Services take and return wire DTOs; mapping to and from entities happens
//! here, field by field.

mod auth;
mod comment;
mod mapper;
mod post;

pub use auth::AuthService;
pub use comment::CommentService;
pub use post::PostService;
