use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::game_entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGameRequest {
    #[schema(example = "123")]
    pub game_number: String,
    #[schema(example = "Lucky 7s")]
    pub game_name: String,
    /// 单张票价（美分）
    #[schema(example = 100)]
    pub price_cents: i64,
    #[schema(example = 150)]
    pub tickets_per_book: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameResponse {
    pub id: i64,
    pub game_number: String,
    pub game_name: String,
    pub price_cents: i64,
    pub tickets_per_book: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<game_entity::Model> for GameResponse {
    fn from(m: game_entity::Model) -> Self {
        GameResponse {
            id: m.id,
            game_number: m.game_number,
            game_name: m.game_name,
            price_cents: m.price_cents,
            tickets_per_book: m.tickets_per_book,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}
