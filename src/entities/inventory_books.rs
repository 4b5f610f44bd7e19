use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "activated")]
    Activated,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "returned")]
    Returned,
    #[sea_orm(string_value = "settled")]
    Settled,
}

impl BookStatus {
    /// 票本状态机:
    /// available -> activated -> {returned, sold, settled}
    /// returned / sold -> activated (重新激活，允许同号重印)
    /// settled 为终态
    pub fn can_transition_to(self, next: BookStatus) -> bool {
        use BookStatus::*;
        matches!(
            (self, next),
            (Available, Activated)
                | (Activated, Returned)
                | (Activated, Sold)
                | (Activated, Settled)
                | (Returned, Activated)
                | (Sold, Activated)
        )
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::Activated => write!(f, "activated"),
            BookStatus::Sold => write!(f, "sold"),
            BookStatus::Returned => write!(f, "returned"),
            BookStatus::Settled => write!(f, "settled"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "inventory_books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub store_id: i64,
    pub game_id: i64,
    pub book_number: String,
    pub reference_number: Option<String>,
    pub status: BookStatus,
    pub activated_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
