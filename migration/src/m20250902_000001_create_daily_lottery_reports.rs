use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum DailyLotteryReports {
    Table,
    Id,
    StoreId,
    ReportDate,
    TodayOnlineNetSales,
    YesterdayOnlineNetSales,
    TodayOnlineCashing,
    YesterdayOnlineCashing,
    TodayInstantCashing,
    YesterdayInstantCashing,
    CreditSales,
    DebitSales,
    RegisterCash,
    InstantSaleSr34,
    TotalOnlineBalance,
    OverShort,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

fn cents(col: DailyLotteryReports) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .default(0)
        .to_owned()
}

/// 每日彩票报表：每个门店每天一行，金额均为美分
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyLotteryReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyLotteryReports::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DailyLotteryReports::StoreId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailyLotteryReports::ReportDate)
                            .date()
                            .not_null(),
                    )
                    .col(&mut cents(DailyLotteryReports::TodayOnlineNetSales))
                    .col(&mut cents(DailyLotteryReports::YesterdayOnlineNetSales))
                    .col(&mut cents(DailyLotteryReports::TodayOnlineCashing))
                    .col(&mut cents(DailyLotteryReports::YesterdayOnlineCashing))
                    .col(&mut cents(DailyLotteryReports::TodayInstantCashing))
                    .col(&mut cents(DailyLotteryReports::YesterdayInstantCashing))
                    .col(&mut cents(DailyLotteryReports::CreditSales))
                    .col(&mut cents(DailyLotteryReports::DebitSales))
                    .col(&mut cents(DailyLotteryReports::RegisterCash))
                    // 以下三列为派生值，可随时由输入重新计算
                    .col(&mut cents(DailyLotteryReports::InstantSaleSr34))
                    .col(&mut cents(DailyLotteryReports::TotalOnlineBalance))
                    .col(&mut cents(DailyLotteryReports::OverShort))
                    .col(
                        ColumnDef::new(DailyLotteryReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(DailyLotteryReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_daily_lottery_reports_store_date_unique")
                    .table(DailyLotteryReports::Table)
                    .col(DailyLotteryReports::StoreId)
                    .col(DailyLotteryReports::ReportDate)
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
                    .table(DailyLotteryReports::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
