use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

use crate::lottery::OnlineFigures;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "daily_lottery_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub store_id: i64,
    pub report_date: NaiveDate,
    pub today_online_net_sales: i64,
    pub yesterday_online_net_sales: i64,
    pub today_online_cashing: i64,
    pub yesterday_online_cashing: i64,
    pub today_instant_cashing: i64,
    pub yesterday_instant_cashing: i64,
    pub credit_sales: i64,
    pub debit_sales: i64,
    pub register_cash: i64,
    pub instant_sale_sr34: i64,
    pub total_online_balance: i64,
    pub over_short: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn today_figures(&self) -> OnlineFigures {
        OnlineFigures {
            online_net_sales: self.today_online_net_sales,
            online_cashing: self.today_online_cashing,
            instant_cashing: self.today_instant_cashing,
        }
    }

    pub fn yesterday_figures(&self) -> OnlineFigures {
        OnlineFigures {
            online_net_sales: self.yesterday_online_net_sales,
            online_cashing: self.yesterday_online_cashing,
            instant_cashing: self.yesterday_instant_cashing,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
