use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_blog_tables::Roles;

const ROLES: [&str; 2] = ["ROLE_USER", "ROLE_ADMIN"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Roles::Table).columns([Roles::Name]);
        for name in ROLES {
            insert.values_panic([name.into()]);
        }
        insert.on_conflict(OnConflict::column(Roles::Name).do_nothing().to_owned());

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Roles::Table)
            .and_where(Expr::col(Roles::Name).is_in(ROLES))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
