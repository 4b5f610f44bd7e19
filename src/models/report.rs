use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::daily_report_entity as reports;
use crate::lottery::OnlineFigures;

/// 创建或更新门店某日的彩票报表，金额均为美分，缺省为 0
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertDailyReportRequest {
    pub store_id: i64,
    #[schema(example = "2025-09-01")]
    pub report_date: NaiveDate,
    #[serde(default)]
    pub today: OnlineFigures,
    #[serde(default)]
    pub yesterday: OnlineFigures,
    #[serde(default)]
    pub credit_sales: i64,
    #[serde(default)]
    pub debit_sales: i64,
    #[serde(default)]
    pub register_cash: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyReportResponse {
    pub id: i64,
    pub store_id: i64,
    pub report_date: NaiveDate,
    pub today: OnlineFigures,
    pub yesterday: OnlineFigures,
    pub credit_sales: i64,
    pub debit_sales: i64,
    pub register_cash: i64,
    pub instant_sale_sr34: i64,
    pub total_online_balance: i64,
    pub over_short: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<reports::Model> for DailyReportResponse {
    fn from(m: reports::Model) -> Self {
        DailyReportResponse {
            id: m.id,
            store_id: m.store_id,
            report_date: m.report_date,
            today: m.today_figures(),
            yesterday: m.yesterday_figures(),
            credit_sales: m.credit_sales,
            debit_sales: m.debit_sales,
            register_cash: m.register_cash,
            instant_sale_sr34: m.instant_sale_sr34,
            total_online_balance: m.total_online_balance,
            over_short: m.over_short,
            updated_at: m.updated_at,
        }
    }
}
