use std::collections::HashMap;

use crate::entities::{BookStatus, game_entity as games, inventory_book_entity as books};
use crate::error::{AppError, AppResult};
use crate::lottery::{BookCode, BookKey, LotteryError};
use crate::models::{BookListQuery, BookPage, BookResponse, PaginatedResponse, PaginationParams};
use crate::services::{AuditEntry, AuditService, GameService};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;

const ENTITY_BOOK: &str = "inventory_book";

#[cfg_attr(not(test), derive(Clone))]
pub struct InventoryService {
    pool: DatabaseConnection,
}

impl InventoryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 票本入库（状态 available），票本号格式 GGG-BBBBBB-R
    pub async fn add_to_inventory(
        &self,
        store_id: i64,
        book_number: &str,
        actor_id: i64,
    ) -> AppResult<BookResponse> {
        let code: BookCode = book_number.parse()?;

        let txn = self.pool.begin().await?;
        let game = GameService::find_by_number(&txn, &code.game_number).await?;

        let inserted = Self::insert_book(
            &txn,
            books::ActiveModel {
                store_id: Set(store_id),
                game_id: Set(game.id),
                book_number: Set(code.book_number.clone()),
                reference_number: Set(Some(code.reference_number.clone())),
                status: Set(BookStatus::Available),
                ..Default::default()
            },
        )
        .await?;
        if !inserted {
            return Err(LotteryError::BookAlreadyExists {
                game_number: code.game_number,
                book_number: code.book_number,
            }
            .into());
        }

        let book = Self::require_book(&txn, store_id, &game, &code.book_number).await?;
        AuditService::record(
            &txn,
            AuditEntry {
                actor_id,
                store_id,
                action: "book.added",
                entity_type: ENTITY_BOOK,
                entity_id: book.id,
                old_value: None,
                new_value: Some(json!({ "status": book.status })),
            },
        )
        .await?;
        txn.commit().await?;

        log::info!(
            "Book {}-{} added to inventory of store {store_id}",
            game.game_number,
            book.book_number
        );
        Ok(BookResponse::new(book, &game.game_number))
    }

    /// 激活票本
    ///
    /// 逻辑:
    /// 1. 校验票本号格式 GGG-BBBBBB-R
    /// 2. 查找游戏，不存在则由调用方引导创建
    /// 3. 已激活的票本直接拒绝（不能静默重置销售进度）
    /// 4. 不存在则新建为 activated；存在则更新状态并覆盖参考号（允许同号重印）
    /// 5. 更新为条件更新，并发激活只有一个请求成功
    pub async fn activate(
        &self,
        store_id: i64,
        book_number: &str,
        actor_id: i64,
    ) -> AppResult<BookResponse> {
        let code: BookCode = book_number.parse()?;
        let already_activated = || LotteryError::AlreadyActivated {
            game_number: code.game_number.clone(),
            book_number: code.book_number.clone(),
        };

        let txn = self.pool.begin().await?;
        let game = GameService::find_by_number(&txn, &code.game_number).await?;
        let existing = Self::find_book(&txn, store_id, game.id, &code.book_number).await?;
        let now = Utc::now();

        let old_status = match existing {
            Some(book) if book.status == BookStatus::Activated => {
                return Err(already_activated().into());
            }
            Some(book) => {
                if !book.status.can_transition_to(BookStatus::Activated) {
                    return Err(LotteryError::InvalidTransition {
                        game_number: code.game_number.clone(),
                        book_number: code.book_number.clone(),
                        from: book.status.to_string(),
                        to: BookStatus::Activated.to_string(),
                    }
                    .into());
                }
                let result = books::Entity::update_many()
                    .set(books::ActiveModel {
                        status: Set(BookStatus::Activated),
                        reference_number: Set(Some(code.reference_number.clone())),
                        activated_at: Set(Some(now)),
                        returned_at: Set(None),
                        updated_at: Set(now),
                        ..Default::default()
                    })
                    .filter(books::Column::Id.eq(book.id))
                    .filter(books::Column::Status.eq(book.status))
                    .exec(&txn)
                    .await?;
                // 状态已被其它请求改变
                if result.rows_affected == 0 {
                    return Err(already_activated().into());
                }
                Some(book.status)
            }
            None => {
                let inserted = Self::insert_book(
                    &txn,
                    books::ActiveModel {
                        store_id: Set(store_id),
                        game_id: Set(game.id),
                        book_number: Set(code.book_number.clone()),
                        reference_number: Set(Some(code.reference_number.clone())),
                        status: Set(BookStatus::Activated),
                        activated_at: Set(Some(now)),
                        ..Default::default()
                    },
                )
                .await?;
                if !inserted {
                    return Err(already_activated().into());
                }
                None
            }
        };

        let book = Self::require_book(&txn, store_id, &game, &code.book_number).await?;
        AuditService::record(
            &txn,
            AuditEntry {
                actor_id,
                store_id,
                action: "book.activated",
                entity_type: ENTITY_BOOK,
                entity_id: book.id,
                old_value: old_status.map(|s| json!({ "status": s })),
                new_value: Some(json!({
                    "status": book.status,
                    "reference_number": book.reference_number,
                })),
            },
        )
        .await?;
        txn.commit().await?;

        log::info!(
            "Book {}-{} activated for store {store_id} (previous status: {})",
            game.game_number,
            book.book_number,
            old_status.map_or_else(|| "none".to_string(), |s| s.to_string())
        );
        Ok(BookResponse::new(book, &game.game_number))
    }

    /// 退回票本，票本号格式 GGG-BBBBBB，仅 activated 状态可退回
    pub async fn return_book(
        &self,
        store_id: i64,
        book_number: &str,
        actor_id: i64,
    ) -> AppResult<BookResponse> {
        let key: BookKey = book_number.parse()?;
        self.finish_activated_book(store_id, key, BookStatus::Returned, "book.returned", actor_id)
            .await
    }

    /// 票本售罄，票本号格式 GGG-BBBBBB
    pub async fn mark_sold(
        &self,
        store_id: i64,
        book_number: &str,
        actor_id: i64,
    ) -> AppResult<BookResponse> {
        let key: BookKey = book_number.parse()?;
        self.finish_activated_book(store_id, key, BookStatus::Sold, "book.sold", actor_id)
            .await
    }

    /// 门店票本列表（分页，可按状态过滤）
    pub async fn list_books(&self, store_id: i64, query: &BookListQuery) -> AppResult<BookPage> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = books::Entity::find().filter(books::Column::StoreId.eq(store_id));
        if let Some(status) = query.status {
            base_query = base_query.filter(books::Column::Status.eq(status));
        }
        let total = base_query.clone().count(&self.pool).await? as i64;

        let models = base_query
            .order_by_desc(books::Column::UpdatedAt)
            .order_by_desc(books::Column::Id)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let game_ids: Vec<i64> = models.iter().map(|b| b.game_id).collect();
        let game_numbers: HashMap<i64, String> = if game_ids.is_empty() {
            HashMap::new()
        } else {
            games::Entity::find()
                .filter(games::Column::Id.is_in(game_ids))
                .all(&self.pool)
                .await?
                .into_iter()
                .map(|g| (g.id, g.game_number))
                .collect()
        };

        let items = models
            .into_iter()
            .map(|b| {
                let game_number = game_numbers.get(&b.game_id).cloned().unwrap_or_default();
                BookResponse::new(b, &game_number)
            })
            .collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    /// activated -> returned / sold
    async fn finish_activated_book(
        &self,
        store_id: i64,
        key: BookKey,
        next: BookStatus,
        action: &str,
        actor_id: i64,
    ) -> AppResult<BookResponse> {
        let not_found = || LotteryError::BookNotFound {
            game_number: key.game_number.clone(),
            book_number: key.book_number.clone(),
        };

        let txn = self.pool.begin().await?;
        let game = GameService::try_find_by_number(&txn, &key.game_number)
            .await?
            .ok_or_else(not_found)?;
        let book = Self::find_book(&txn, store_id, game.id, &key.book_number)
            .await?
            .filter(|b| b.status == BookStatus::Activated)
            .ok_or_else(not_found)?;

        let now = Utc::now();
        let mut changes = books::ActiveModel {
            status: Set(next),
            updated_at: Set(now),
            ..Default::default()
        };
        if next == BookStatus::Returned {
            changes.returned_at = Set(Some(now));
        }
        let result = books::Entity::update_many()
            .set(changes)
            .filter(books::Column::Id.eq(book.id))
            .filter(books::Column::Status.eq(BookStatus::Activated))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found().into());
        }

        let updated = Self::require_book(&txn, store_id, &game, &key.book_number).await?;
        AuditService::record(
            &txn,
            AuditEntry {
                actor_id,
                store_id,
                action,
                entity_type: ENTITY_BOOK,
                entity_id: updated.id,
                old_value: Some(json!({ "status": book.status })),
                new_value: Some(json!({ "status": updated.status })),
            },
        )
        .await?;
        txn.commit().await?;

        log::info!(
            "Book {}-{} of store {store_id} moved to {next}",
            game.game_number,
            updated.book_number
        );
        Ok(BookResponse::new(updated, &game.game_number))
    }

    pub(crate) async fn find_book<C: ConnectionTrait>(
        conn: &C,
        store_id: i64,
        game_id: i64,
        book_number: &str,
    ) -> AppResult<Option<books::Model>> {
        let book = books::Entity::find()
            .filter(books::Column::StoreId.eq(store_id))
            .filter(books::Column::GameId.eq(game_id))
            .filter(books::Column::BookNumber.eq(book_number))
            .one(conn)
            .await?;
        Ok(book)
    }

    async fn require_book<C: ConnectionTrait>(
        conn: &C,
        store_id: i64,
        game: &games::Model,
        book_number: &str,
    ) -> AppResult<books::Model> {
        Self::find_book(conn, store_id, game.id, book_number)
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Book {}-{book_number} disappeared after write",
                    game.game_number
                ))
            })
    }

    /// 依赖 (store_id, game_id, book_number) 唯一索引，冲突时不插入，返回是否插入成功
    async fn insert_book<C: ConnectionTrait>(
        conn: &C,
        model: books::ActiveModel,
    ) -> AppResult<bool> {
        let rows = books::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    books::Column::StoreId,
                    books::Column::GameId,
                    books::Column::BookNumber,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(rows > 0)
    }
}
