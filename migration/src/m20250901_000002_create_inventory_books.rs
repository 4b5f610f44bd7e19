use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum InventoryBooks {
    Table,
    Id,
    StoreId,
    GameId,
    BookNumber,
    ReferenceNumber,
    Status,
    ActivatedAt,
    ReturnedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LotteryGames {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 票本库存表
///
/// status 以 varchar 存储: available / activated / sold / returned / settled
/// (store_id, game_id, book_number) 唯一，用于防止并发重复激活
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryBooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryBooks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::StoreId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::BookNumber)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::ReferenceNumber)
                            .string_len(1)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::Status)
                            .string_len(16)
                            .not_null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::ActivatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::ReturnedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(InventoryBooks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_books_game")
                            .from(InventoryBooks::Table, InventoryBooks::GameId)
                            .to(LotteryGames::Table, LotteryGames::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inventory_books_store_game_book_unique")
                    .table(InventoryBooks::Table)
                    .col(InventoryBooks::StoreId)
                    .col(InventoryBooks::GameId)
                    .col(InventoryBooks::BookNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 按门店+状态列出库存
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_inventory_books_store_status")
                    .table(InventoryBooks::Table)
                    .col(InventoryBooks::StoreId)
                    .col(InventoryBooks::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(InventoryBooks::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
