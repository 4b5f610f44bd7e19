use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

/// 扫描记录，写入后不再修改
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "scanned_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub daily_report_id: i64,
    pub inventory_book_id: i64,
    pub game_number: String,
    pub book_number: String,
    pub ticket_number: String,
    pub scanned_on: NaiveDate,
    pub quantity_sold: i32,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
