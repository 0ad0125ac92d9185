use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string(User::DiscordId).primary_key())
                    .col(string(User::Username))
                    .col(string_len(User::Status, 16).default("pending"))
                    .col(string_len(User::Role, 16).default("user"))
                    .col(
                        timestamp(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending registrations are listed by status
        manager
            .create_index(
                Index::create()
                    .name("idx_user_status")
                    .table(User::Table)
                    .col(User::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    DiscordId,
    Username,
    Status,
    Role,
    CreatedAt,
}
