use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::scanned_ticket_entity as scans;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanTicketRequest {
    #[schema(example = "123-456789-120")]
    pub ticket_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScannedTicketResponse {
    pub id: i64,
    pub daily_report_id: i64,
    pub inventory_book_id: i64,
    pub game_number: String,
    pub book_number: String,
    pub ticket_number: String,
    pub scanned_on: NaiveDate,
    pub quantity_sold: i32,
    /// 销售金额（美分）
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<scans::Model> for ScannedTicketResponse {
    fn from(m: scans::Model) -> Self {
        ScannedTicketResponse {
            id: m.id,
            daily_report_id: m.daily_report_id,
            inventory_book_id: m.inventory_book_id,
            game_number: m.game_number,
            book_number: m.book_number,
            ticket_number: m.ticket_number,
            scanned_on: m.scanned_on,
            quantity_sold: m.quantity_sold,
            total_cents: m.total_cents,
            created_at: m.created_at,
        }
    }
}
