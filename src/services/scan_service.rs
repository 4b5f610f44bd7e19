use std::time::Duration;

use crate::config::LotteryConfig;
use crate::entities::{BookStatus, scanned_ticket_entity as scans};
use crate::error::{AppError, AppResult};
use crate::lottery::{
    DaySearch, LotteryError, ScanInput, TicketCode, compute_scan, find_last_scanned,
    parse_ticket_number, search_floor,
};
use crate::models::ScannedTicketResponse;
use crate::services::{DailyReportService, GameService, InventoryService};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

#[cfg_attr(not(test), derive(Clone))]
pub struct ScanService {
    pool: DatabaseConnection,
    lottery: LotteryConfig,
}

impl ScanService {
    pub fn new(pool: DatabaseConnection, lottery: LotteryConfig) -> Self {
        Self { pool, lottery }
    }

    /// 扫描票号并计入日报表
    ///
    /// 逻辑:
    /// 1. 校验票号格式 GGG-BBBBBB-TTT
    /// 2. 依次查找游戏、报表、已激活票本
    /// 3. 同一票本每个报表日期只允许扫描一次
    /// 4. 从报表日期前一天起逐日回溯，取最近一次扫描票号
    /// 5. 计算售出张数与金额，写入扫描记录并重算报表，全部在同一事务内
    pub async fn scan(
        &self,
        report_id: i64,
        ticket_number: &str,
    ) -> AppResult<ScannedTicketResponse> {
        let code: TicketCode = ticket_number.parse()?;
        let current_ticket = code.ticket_value();
        let duplicate = || LotteryError::DuplicateScan {
            game_number: code.game_number.clone(),
            book_number: code.book_number.clone(),
        };

        let txn = self.pool.begin().await?;
        let game = GameService::find_by_number(&txn, &code.game_number).await?;
        let report = DailyReportService::find_report(&txn, report_id).await?;
        let book = InventoryService::find_book(&txn, report.store_id, game.id, &code.book_number)
            .await?
            .filter(|b| b.status == BookStatus::Activated)
            .ok_or_else(|| LotteryError::BookNotFound {
                game_number: code.game_number.clone(),
                book_number: code.book_number.clone(),
            })?;

        if Self::find_scan_on(&txn, book.id, report.report_date)
            .await?
            .is_some()
        {
            return Err(duplicate().into());
        }

        let search = DaySearch::new(
            report.report_date,
            book.activated_at.and_then(search_floor),
            self.lottery.scan_lookback_days,
        );
        let conn = &txn;
        let book_id = book.id;
        let prior = tokio::time::timeout(
            Duration::from_secs(self.lottery.scan_lookup_timeout_secs),
            find_last_scanned(search, move |day| Self::ticket_scanned_on(conn, book_id, day)),
        )
        .await
        .map_err(|_| {
            log::warn!(
                "Scan lookup for book {}-{} timed out",
                code.game_number,
                code.book_number
            );
            LotteryError::ScanLookupTimeout
        })??;

        let computed = compute_scan(
            &ScanInput {
                game_name: &game.game_name,
                book_number: &book.book_number,
                price_cents: game.price_cents,
                tickets_per_book: game.tickets_per_book,
                reference_number: book.reference_number.as_deref(),
                prior_ticket: prior.map(|p| p.ticket_number),
                current_ticket,
            },
            self.lottery.fresh_book_start,
        )?;

        let inserted = scans::Entity::insert(scans::ActiveModel {
            daily_report_id: Set(report.id),
            inventory_book_id: Set(book.id),
            game_number: Set(code.game_number.clone()),
            book_number: Set(code.book_number.clone()),
            ticket_number: Set(code.ticket_number.clone()),
            scanned_on: Set(report.report_date),
            quantity_sold: Set(computed.quantity_sold),
            total_cents: Set(computed.total_cents),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([scans::Column::InventoryBookId, scans::Column::ScannedOn])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;
        // 并发扫描被唯一索引拦截
        if inserted == 0 {
            return Err(duplicate().into());
        }

        let scanned = Self::find_scan_on(&txn, book.id, report.report_date)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Scan for book {}-{} disappeared after insert",
                    code.game_number, code.book_number
                ))
            })?;
        DailyReportService::recalculate_in(&txn, report).await?;
        txn.commit().await?;

        log::info!(
            "Scanned {} on report {report_id}: start {}, sold {}, total {} cents",
            ticket_number,
            computed.start_number,
            computed.quantity_sold,
            computed.total_cents
        );
        Ok(scanned.into())
    }

    /// 报表下的全部扫描记录，按写入顺序
    pub async fn list_scans(&self, report_id: i64) -> AppResult<Vec<ScannedTicketResponse>> {
        DailyReportService::find_report(&self.pool, report_id).await?;
        let rows = scans::Entity::find()
            .filter(scans::Column::DailyReportId.eq(report_id))
            .order_by_asc(scans::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_scan_on<C: ConnectionTrait>(
        conn: &C,
        book_id: i64,
        day: NaiveDate,
    ) -> AppResult<Option<scans::Model>> {
        let scan = scans::Entity::find()
            .filter(scans::Column::InventoryBookId.eq(book_id))
            .filter(scans::Column::ScannedOn.eq(day))
            .one(conn)
            .await?;
        Ok(scan)
    }

    async fn ticket_scanned_on<C: ConnectionTrait>(
        conn: &C,
        book_id: i64,
        day: NaiveDate,
    ) -> AppResult<Option<i32>> {
        let scan = Self::find_scan_on(conn, book_id, day).await?;
        Ok(scan.and_then(|s| parse_ticket_number(&s.ticket_number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{daily_report_entity as reports, game_entity as games};
    use crate::lottery::FreshBookStart;
    use crate::services::test_support::{book, game, report, scan};
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    fn config(fresh_book_start: FreshBookStart) -> LotteryConfig {
        LotteryConfig {
            fresh_book_start,
            ..LotteryConfig::default()
        }
    }

    fn no_scan() -> Vec<scans::Model> {
        Vec::new()
    }

    #[tokio::test]
    async fn test_scan_rejects_malformed_ticket() {
        let service = ScanService::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            LotteryConfig::default(),
        );
        let err = service.scan(1, "123-456789-12").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::InvalidFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_unknown_game() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<games::Model>::new()])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let err = service.scan(1, "999-456789-120").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::GameNotFound(ref g)) if g == "999"
        ));
    }

    #[tokio::test]
    async fn test_scan_duplicate_same_day() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Activated)]])
            .append_query_results([vec![scan(11, 7, 3, day(3), "120")]])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let err = service.scan(7, "123-456789-100").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::DuplicateScan { .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_book_not_activated() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Returned)]])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let err = service.scan(7, "123-456789-100").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::BookNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_scan_sequence_anomaly() {
        // 前一天票号 100，今天扫到 120
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Activated)]])
            .append_query_results([no_scan()])
            .append_query_results([vec![scan(10, 6, 3, day(2), "100")]])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let err = service.scan(7, "123-456789-120").await.unwrap_err();
        match err {
            AppError::Lottery(LotteryError::SequenceAnomaly(anomaly)) => {
                assert_eq!(anomaly.prior_ticket, 100);
                assert_eq!(anomaly.current_ticket, 120);
                assert_eq!(anomaly.book_number, "456789");
                assert_eq!(anomaly.game_name, "Game 123");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fresh_book_uses_reference_number() {
        // 激活后立即扫描 149，参考号 0 作为起始票号，数量为负
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Activated)]])
            .append_query_results([no_scan()])
            .append_query_results([no_scan()])
            .append_query_results([no_scan()])
            .append_query_results([no_scan()])
            .into_connection();
        let service = ScanService::new(db, config(FreshBookStart::ReferenceNumber));

        let err = service.scan(7, "123-456789-149").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::InvalidSequence {
                start: 0,
                current: 149
            })
        ));
    }

    #[tokio::test]
    async fn test_fresh_book_full_book_mode() {
        let mut saved = scan(21, 7, 3, day(3), "140");
        saved.quantity_sold = 10;
        saved.total_cents = 1_000;
        let mut recalculated = report(7, 1, day(3));
        recalculated.instant_sale_sr34 = 1_000;
        recalculated.total_online_balance = 1_000;
        recalculated.over_short = -1_000;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Activated)]])
            .append_query_results([no_scan()])
            .append_query_results([no_scan()])
            .append_query_results([no_scan()])
            .append_query_results([no_scan()])
            .append_exec_results([MockExecResult {
                last_insert_id: 21,
                rows_affected: 1,
            }])
            .append_query_results([vec![saved.clone()]])
            .append_query_results([vec![saved]])
            .append_query_results([vec![recalculated]])
            .into_connection();
        let service = ScanService::new(db, config(FreshBookStart::FullBook));

        let resp = service.scan(7, "123-456789-140").await.unwrap();
        // 起始票号 149: 149 - 140 + 1 = 10 张
        assert_eq!(resp.quantity_sold, 10);
        assert_eq!(resp.total_cents, 1_000);
        assert_eq!(resp.scanned_on, day(3));
    }

    #[tokio::test]
    async fn test_scan_with_prior_scan() {
        // 昨天 120，今天 100: 120 - 100 + 1 = 21 张，每张 $2
        let mut saved = scan(22, 7, 3, day(3), "100");
        saved.quantity_sold = 21;
        saved.total_cents = 4_200;
        let mut recalculated = report(7, 1, day(3));
        recalculated.instant_sale_sr34 = 4_200;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 200, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Activated)]])
            .append_query_results([no_scan()])
            .append_query_results([vec![scan(10, 6, 3, day(2), "120")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 22,
                rows_affected: 1,
            }])
            .append_query_results([vec![saved.clone()]])
            .append_query_results([vec![saved]])
            .append_query_results([vec![recalculated]])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let resp = service.scan(7, "123-456789-100").await.unwrap();
        assert_eq!(resp.quantity_sold, 21);
        assert_eq!(resp.total_cents, 4_200);
    }

    #[tokio::test]
    async fn test_evening_activation_reads_prior_local_day() {
        // 门店本地 9/2 晚上激活（UTC 9/3 01:00），9/2 报表扫过 120，9/3 扫到 100
        let mut activated = book(3, 1, "456789", Some("0"), BookStatus::Activated);
        activated.activated_at = Some(Utc.with_ymd_and_hms(2025, 9, 3, 1, 0, 0).unwrap());
        let mut saved = scan(23, 7, 3, day(3), "100");
        saved.quantity_sold = 21;
        saved.total_cents = 2_100;
        let mut recalculated = report(7, 1, day(3));
        recalculated.instant_sale_sr34 = 2_100;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![activated]])
            .append_query_results([no_scan()])
            .append_query_results([vec![scan(10, 6, 3, day(2), "120")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 23,
                rows_affected: 1,
            }])
            .append_query_results([vec![saved.clone()]])
            .append_query_results([vec![saved]])
            .append_query_results([vec![recalculated]])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let resp = service.scan(7, "123-456789-100").await.unwrap();
        assert_eq!(resp.quantity_sold, 21);
        assert_eq!(resp.total_cents, 2_100);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .append_query_results([vec![report(7, 1, day(3))]])
            .append_query_results([vec![book(3, 1, "456789", Some("0"), BookStatus::Activated)]])
            .append_query_results([no_scan()])
            .append_query_results([vec![scan(10, 6, 3, day(2), "120")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let err = service.scan(7, "123-456789-100").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::DuplicateScan { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_scans_requires_report() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reports::Model>::new()])
            .into_connection();
        let service = ScanService::new(db, LotteryConfig::default());

        let err = service.list_scans(5).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::ReportNotFound(5))
        ));
    }
}
