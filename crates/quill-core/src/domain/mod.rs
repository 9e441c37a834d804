//! Domain entities - the core business objects.

mod comment;
mod post;
mod role;
mod user;

pub use comment::Comment;
pub use post::Post;
pub use role::{ROLE_ADMIN, ROLE_USER, Role};
pub use user::User;
