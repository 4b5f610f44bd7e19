use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum ScannedTickets {
    Table,
    Id,
    DailyReportId,
    InventoryBookId,
    GameNumber,
    BookNumber,
    TicketNumber,
    ScannedOn,
    QuantitySold,
    TotalCents,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DailyLotteryReports {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum InventoryBooks {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScannedTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScannedTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::DailyReportId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::InventoryBookId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::GameNumber)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::BookNumber)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::TicketNumber)
                            .string_len(3)
                            .not_null(),
                    )
                    // 冗余报表日期，用于同日重复扫描的唯一约束
                    .col(ColumnDef::new(ScannedTickets::ScannedOn).date().not_null())
                    .col(
                        ColumnDef::new(ScannedTickets::QuantitySold)
                            .integer()
                            .not_null()
                            .check(Expr::col(ScannedTickets::QuantitySold).gte(0)),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::TotalCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScannedTickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scanned_tickets_report")
                            .from(ScannedTickets::Table, ScannedTickets::DailyReportId)
                            .to(DailyLotteryReports::Table, DailyLotteryReports::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scanned_tickets_book")
                            .from(ScannedTickets::Table, ScannedTickets::InventoryBookId)
                            .to(InventoryBooks::Table, InventoryBooks::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一票本同一天只能扫描一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scanned_tickets_book_day_unique")
                    .table(ScannedTickets::Table)
                    .col(ScannedTickets::InventoryBookId)
                    .col(ScannedTickets::ScannedOn)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scanned_tickets_report")
                    .table(ScannedTickets::Table)
                    .col(ScannedTickets::DailyReportId)
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
                    .table(ScannedTickets::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
