use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};

use quill_core::domain::{Comment, Post, Role, User};
use quill_core::error::RepoError;
use quill_core::paging::{PageRequest, PostSort, PostSortField, SortDirection};
use quill_core::ports::{
    BaseRepository, CommentRepository, PostRepository, RoleRepository, UserRepository,
};

use super::postgres_base::write_error;
use crate::database::entity::{comment, post, role, user, user_role};
use crate::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresRoleRepository,
    PostgresUserRepository,
};

fn role_model(id: i64, name: &str) -> role::Model {
    let now = Utc::now();
    role::Model {
        id,
        name: name.to_owned(),
        date_created: now.into(),
        last_updated: now.into(),
    }
}

fn user_model(id: i64) -> user::Model {
    user::Model {
        id,
        name: "Ann".to_owned(),
        username: "ann".to_owned(),
        email: "ann@example.com".to_owned(),
        password_hash: "$argon2id$hash".to_owned(),
    }
}

fn count_row(count: i64) -> BTreeMap<String, Value> {
    BTreeMap::from([("num_items".to_owned(), Value::from(count))])
}

fn post_model(id: i64, title: &str) -> post::Model {
    post::Model {
        id,
        title: title.to_owned(),
        description: "A description".to_owned(),
        content: "Content".to_owned(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(5, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(5).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.id, 5);
    assert_eq!(post.title, "Test Post");
}

#[tokio::test]
async fn test_insert_post_returns_generated_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(11, "Fresh")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let draft = Post::new("Fresh".into(), "A description".into(), "Content".into());

    let saved: Post = repo.insert(draft).await.unwrap();

    assert_eq!(saved.id, 11);
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, i64>::delete(&repo, 99).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_comments_by_post_id() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            comment::Model {
                id: 1,
                post_id: 3,
                name: "Ann".to_owned(),
                email: "ann@example.com".to_owned(),
                body: "First comment".to_owned(),
                date_created: now.into(),
                last_updated: now.into(),
            },
            comment::Model {
                id: 2,
                post_id: 3,
                name: "Bob".to_owned(),
                email: "bob@example.com".to_owned(),
                body: "Second comment".to_owned(),
                date_created: now.into(),
                last_updated: now.into(),
            },
        ]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);

    let comments: Vec<Comment> = repo.find_by_post_id(3).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|c| c.post_id == 3));
    assert_eq!(comments[1].name, "Bob");
}

#[tokio::test]
async fn test_find_role_by_name() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![role::Model {
            id: 1,
            name: "ROLE_USER".to_owned(),
            date_created: now.into(),
            last_updated: now.into(),
        }]])
        .into_connection();

    let repo = PostgresRoleRepository::new(db);

    let role = repo.find_by_name("ROLE_USER").await.unwrap();
    assert_eq!(role.map(|r| r.id), Some(1));
}

#[tokio::test]
async fn test_find_page_orders_and_counts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(25)]])
        .append_query_results([[post_model(9, "zebra"), post_model(4, "yak")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db.clone());
    let sort = PostSort {
        field: PostSortField::Title,
        direction: SortDirection::Desc,
    };

    let page = repo
        .find_page(PageRequest::new(2, 10, sort).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_elements, 25);
    assert_eq!(page.total_pages(), 3);
    assert!(page.is_last());
    assert_eq!(page.items[0].title, "zebra");

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#"\"posts\".\"title\" DESC, \"posts\".\"id\" ASC"#));
    assert!(log.contains("OFFSET"));
}

#[tokio::test]
async fn test_find_page_by_id_has_no_tie_break() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[count_row(1)]])
        .append_query_results([[post_model(1, "only")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db.clone());

    let page = repo
        .find_page(PageRequest::new(0, 10, PostSort::default()).unwrap())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains(r#"ORDER BY \"posts\".\"id\" ASC LIMIT"#));
}

#[tokio::test]
async fn test_find_user_loads_roles() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[
            (user_model(3), role_model(1, "ROLE_USER")),
            (user_model(3), role_model(2, "ROLE_ADMIN")),
        ]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo
        .find_by_username_or_email("ann", "ann")
        .await
        .unwrap()
        .expect("user should be found");

    assert_eq!(found.id, 3);
    assert!(found.has_role("ROLE_USER"));
    assert!(found.has_role("ROLE_ADMIN"));
}

#[tokio::test]
async fn test_find_user_prefers_username_match() {
    let by_email = user::Model {
        email: "shared@example.com".to_owned(),
        ..user_model(1)
    };
    let by_username = user::Model {
        username: "shared@example.com".to_owned(),
        email: "other@example.com".to_owned(),
        ..user_model(2)
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[
            (by_email, role_model(1, "ROLE_USER")),
            (by_username, role_model(1, "ROLE_USER")),
        ]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo
        .find_by_username_or_email("shared@example.com", "shared@example.com")
        .await
        .unwrap();

    assert_eq!(found.map(|u| u.id), Some(2));
}

#[tokio::test]
async fn test_insert_user_links_roles_in_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user_model(21)]])
        .append_query_results([[user_role::Model {
            user_id: 21,
            role_id: 1,
        }]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresUserRepository::new(db.clone());
    let draft = User::new(
        "Ann".into(),
        "ann".into(),
        "ann@example.com".into(),
        "$argon2id$hash".into(),
        vec![Role::new(1, "ROLE_USER")],
    );

    let saved = repo.insert(draft).await.unwrap();

    assert_eq!(saved.id, 21);
    assert_eq!(saved.role_names(), vec!["ROLE_USER".to_string()]);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("users_roles"));
}

#[test]
fn test_write_error_maps_constraints() {
    let duplicate = DbErr::Custom(
        "duplicate key value violates unique constraint \"users_username_key\"".to_owned(),
    );
    let orphan = DbErr::Custom(
        "insert violates foreign key constraint \"fk_comments_post\"".to_owned(),
    );

    assert!(matches!(write_error(duplicate), RepoError::Constraint(_)));
    assert!(matches!(write_error(orphan), RepoError::Constraint(_)));
    assert!(matches!(write_error(DbErr::RecordNotUpdated), RepoError::NotFound));
    assert!(matches!(
        write_error(DbErr::Custom("syntax error".to_owned())),
        RepoError::Query(_)
    ));
}
