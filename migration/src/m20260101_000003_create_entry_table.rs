use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000002_create_room_table::Room;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entry::Table)
                    .if_not_exists()
                    .col(pk_auto(Entry::Id))
                    .col(integer(Entry::RoomId))
                    .col(string(Entry::UserId))
                    .col(string(Entry::Name))
                    .col(string(Entry::YamlFilePath))
                    .col(
                        timestamp(Entry::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entry_room_id")
                            .from(Entry::Table, Entry::RoomId)
                            .to(Room::Table, Room::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_entry_room_name_unique")
                            .col(Entry::RoomId)
                            .col(Entry::Name),
                    )
                    .to_owned(),
            )
            .await?;

        // Joinable-room listing counts entries per (room, user)
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_user_id")
                    .table(Entry::Table)
                    .col(Entry::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entry::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Entry {
    Table,
    Id,
    RoomId,
    UserId,
    Name,
    YamlFilePath,
    CreatedAt,
}
