use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{BookStatus, inventory_book_entity as books};

/// 票本生命周期操作请求（入库 / 激活 / 退回 / 售罄）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookLifecycleRequest {
    pub store_id: i64,
    /// 激活/入库: GGG-BBBBBB-R；退回/售罄: GGG-BBBBBB
    #[schema(example = "123-456789-0")]
    pub book_number: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BookListQuery {
    pub status: Option<BookStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: i64,
    pub store_id: i64,
    pub game_id: i64,
    pub game_number: String,
    pub book_number: String,
    pub reference_number: Option<String>,
    pub status: BookStatus,
    pub activated_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookResponse {
    pub fn new(m: books::Model, game_number: &str) -> Self {
        BookResponse {
            id: m.id,
            store_id: m.store_id,
            game_id: m.game_id,
            game_number: game_number.to_string(),
            book_number: m.book_number,
            reference_number: m.reference_number,
            status: m.status,
            activated_at: m.activated_at,
            returned_at: m.returned_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
