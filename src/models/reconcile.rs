use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lottery::OnlineFigures;

/// 临时对账（不落库）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReconcileRequest {
    #[serde(default)]
    pub today: OnlineFigures,
    #[serde(default)]
    pub yesterday: OnlineFigures,
    #[serde(default)]
    pub ticket_totals: Vec<i64>,
    #[serde(default)]
    pub register_cash: i64,
}
