use sea_orm_migration::prelude::*;

/// Lottery Games (彩票游戏配置)
#[derive(DeriveIden)]
enum LotteryGames {
    Table,
    Id,
    GameNumber,
    GameName,
    PriceCents,
    TicketsPerBook,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LotteryGames::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LotteryGames::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LotteryGames::GameNumber)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LotteryGames::GameName)
                            .string_len(255)
                            .not_null(),
                    )
                    // 单张票价（美分）
                    .col(
                        ColumnDef::new(LotteryGames::PriceCents)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(LotteryGames::PriceCents).gt(0)),
                    )
                    .col(
                        ColumnDef::new(LotteryGames::TicketsPerBook)
                            .integer()
                            .not_null()
                            .check(Expr::col(LotteryGames::TicketsPerBook).gt(0)),
                    )
                    .col(
                        ColumnDef::new(LotteryGames::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(LotteryGames::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(LotteryGames::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 游戏编号唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lottery_games_game_number_unique")
                    .table(LotteryGames::Table)
                    .col(LotteryGames::GameNumber)
                    .unique()
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
                    .table(LotteryGames::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
