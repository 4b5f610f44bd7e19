use crate::entities::{daily_report_entity as reports, scanned_ticket_entity as scans};
use crate::error::AppResult;
use crate::lottery::{LotteryError, reconcile};
use crate::models::{DailyReportResponse, UpsertDailyReportRequest};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, Set, TransactionTrait,
};

#[cfg_attr(not(test), derive(Clone))]
pub struct DailyReportService {
    pool: DatabaseConnection,
}

impl DailyReportService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建或更新门店当日报表（每个门店每天一行），随后重新计算派生字段
    pub async fn upsert_report(
        &self,
        request: UpsertDailyReportRequest,
    ) -> AppResult<DailyReportResponse> {
        let txn = self.pool.begin().await?;
        let now = Utc::now();

        reports::Entity::insert(reports::ActiveModel {
            store_id: Set(request.store_id),
            report_date: Set(request.report_date),
            today_online_net_sales: Set(request.today.online_net_sales),
            yesterday_online_net_sales: Set(request.yesterday.online_net_sales),
            today_online_cashing: Set(request.today.online_cashing),
            yesterday_online_cashing: Set(request.yesterday.online_cashing),
            today_instant_cashing: Set(request.today.instant_cashing),
            yesterday_instant_cashing: Set(request.yesterday.instant_cashing),
            credit_sales: Set(request.credit_sales),
            debit_sales: Set(request.debit_sales),
            register_cash: Set(request.register_cash),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([reports::Column::StoreId, reports::Column::ReportDate])
                .update_columns([
                    reports::Column::TodayOnlineNetSales,
                    reports::Column::YesterdayOnlineNetSales,
                    reports::Column::TodayOnlineCashing,
                    reports::Column::YesterdayOnlineCashing,
                    reports::Column::TodayInstantCashing,
                    reports::Column::YesterdayInstantCashing,
                    reports::Column::CreditSales,
                    reports::Column::DebitSales,
                    reports::Column::RegisterCash,
                    reports::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        let report = reports::Entity::find()
            .filter(reports::Column::StoreId.eq(request.store_id))
            .filter(reports::Column::ReportDate.eq(request.report_date))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                crate::error::AppError::InternalError(format!(
                    "Report for store {} on {} disappeared after upsert",
                    request.store_id, request.report_date
                ))
            })?;

        let updated = Self::recalculate_in(&txn, report).await?;
        txn.commit().await?;
        Ok(updated.into())
    }

    pub async fn get_report(&self, report_id: i64) -> AppResult<DailyReportResponse> {
        Ok(Self::find_report(&self.pool, report_id).await?.into())
    }

    /// 由已存储的输入重新推导派生字段，可重复调用
    pub async fn recalculate(&self, report_id: i64) -> AppResult<DailyReportResponse> {
        let txn = self.pool.begin().await?;
        let report = Self::find_report(&txn, report_id).await?;
        let updated = Self::recalculate_in(&txn, report).await?;
        txn.commit().await?;
        Ok(updated.into())
    }

    pub(crate) async fn find_report<C: ConnectionTrait>(
        conn: &C,
        report_id: i64,
    ) -> AppResult<reports::Model> {
        reports::Entity::find_by_id(report_id)
            .one(conn)
            .await?
            .ok_or_else(|| LotteryError::ReportNotFound(report_id).into())
    }

    /// 汇总报表下全部扫描金额并写回 instant_sale_sr34 / total_online_balance / over_short
    pub(crate) async fn recalculate_in<C: ConnectionTrait>(
        conn: &C,
        report: reports::Model,
    ) -> AppResult<reports::Model> {
        let ticket_totals: Vec<i64> = scans::Entity::find()
            .filter(scans::Column::DailyReportId.eq(report.id))
            .all(conn)
            .await?
            .into_iter()
            .map(|s| s.total_cents)
            .collect();

        let result = reconcile(
            &report.today_figures(),
            &report.yesterday_figures(),
            &ticket_totals,
            report.register_cash,
        );

        let mut am = report.into_active_model();
        am.instant_sale_sr34 = Set(result.instant_sale_sr34);
        am.total_online_balance = Set(result.total_online_balance);
        am.over_short = Set(result.over_short);
        am.updated_at = Set(Utc::now());
        let updated = am.update(conn).await?;

        log::debug!(
            "Report {} reconciled: balance {} over/short {}",
            updated.id,
            updated.total_online_balance,
            updated.over_short
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::test_support::{report, scan};
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_recalculate_writes_derived_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        let mut stored = report(7, 1, date);
        stored.today_online_net_sales = 50_000;
        stored.yesterday_online_net_sales = 40_000;
        stored.today_online_cashing = 5_000;
        stored.yesterday_online_cashing = 4_000;
        stored.today_instant_cashing = 2_000;
        stored.yesterday_instant_cashing = 1_500;
        stored.register_cash = 10_000;

        let mut first = scan(1, 7, 3, date, "120");
        first.total_cents = 3_000;
        let mut second = scan(2, 7, 4, date, "040");
        second.total_cents = 2_000;

        let mut expected = stored.clone();
        expected.instant_sale_sr34 = 5_000;
        expected.total_online_balance = 13_500;
        expected.over_short = -3_500;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored]])
            .append_query_results([vec![first, second]])
            .append_query_results([vec![expected]])
            .into_connection();
        let service = DailyReportService::new(db);

        let resp = service.recalculate(7).await.unwrap();
        assert_eq!(resp.instant_sale_sr34, 5_000);
        assert_eq!(resp.total_online_balance, 13_500);
        assert_eq!(resp.over_short, -3_500);
    }

    #[tokio::test]
    async fn test_missing_report() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reports::Model>::new()])
            .into_connection();
        let service = DailyReportService::new(db);

        let err = service.get_report(42).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::ReportNotFound(42))
        ));
    }
}
