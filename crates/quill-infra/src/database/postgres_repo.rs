//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use quill_core::domain::{Comment, Post, Role, User};
use quill_core::error::RepoError;
use quill_core::paging::{Page, PageRequest, PostSortField, SortDirection};
use quill_core::ports::{CommentRepository, PostRepository, RoleRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::role::{self, Entity as RoleEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::entity::user_role::{self, Entity as UserRoleEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

/// PostgreSQL post repository. Comments are removed by the foreign key's
/// `ON DELETE CASCADE`.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_page(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        let column = match request.sort.field {
            PostSortField::Id => post::Column::Id,
            PostSortField::Title => post::Column::Title,
            PostSortField::Description => post::Column::Description,
            PostSortField::Content => post::Column::Content,
        };
        let order = match request.sort.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        let mut query = PostEntity::find().order_by(column, order);
        if request.sort.field != PostSortField::Id {
            query = query.order_by_asc(post::Column::Id);
        }

        let paginator = query.paginate(&self.db, request.page_size);
        let total_elements = paginator.num_items().await.map_err(query_error)?;
        let models = paginator
            .fetch_page(request.page_no)
            .await
            .map_err(query_error)?;

        tracing::debug!(
            page_no = request.page_no,
            page_size = request.page_size,
            total_elements,
            "Fetched post page"
        );

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            page_no: request.page_no,
            page_size: request.page_size,
            total_elements,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Mask the local part of an address so logs carry no PII.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 1 => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        Some((_, domain)) => format!("***@{domain}"),
        None => "***".to_string(),
    }
}

/// PostgreSQL user repository. Users are read together with their roles.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, email = %mask_email(email), "Finding user");

        let found = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .find_with_related(RoleEntity)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        // A username match wins over an email match.
        let index = found
            .iter()
            .position(|(model, _)| model.username == username)
            .unwrap_or(0);

        Ok(found
            .into_iter()
            .nth(index)
            .map(|(model, roles)| model.into_user(roles)))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await
            .map_err(query_error)?;
        Ok(count > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepoError> {
        let count = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(query_error)?;
        Ok(count > 0)
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let roles = user.roles.clone();
        let mut active_model: user::ActiveModel = user.into();
        active_model.id = sea_orm::NotSet;

        let txn = self.db.begin().await.map_err(query_error)?;

        let model = sea_orm::ActiveModelTrait::insert(active_model, &txn)
            .await
            .map_err(write_error)?;

        let links: Vec<user_role::ActiveModel> = roles
            .iter()
            .map(|role| user_role::ActiveModel {
                user_id: Set(model.id),
                role_id: Set(role.id),
            })
            .collect();
        if !links.is_empty() {
            UserRoleEntity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(write_error)?;
        }

        txn.commit().await.map_err(query_error)?;

        Ok(User {
            roles,
            ..model.into_user(Vec::new())
        })
    }
}

/// PostgreSQL role lookups.
pub struct PostgresRoleRepository {
    db: DbConn,
}

impl PostgresRoleRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepoError> {
        let result = RoleEntity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}
