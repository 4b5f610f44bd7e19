use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 彩票机读数（美分）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OnlineFigures {
    #[serde(default)]
    pub online_net_sales: i64,
    #[serde(default)]
    pub online_cashing: i64,
    #[serde(default)]
    pub instant_cashing: i64,
}

/// 对账结果（美分）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reconciliation {
    /// 当日扫描的即开票销售额合计
    pub instant_sale_sr34: i64,
    pub online_sales_diff: i64,
    pub online_cashing_diff: i64,
    pub instant_cashing_diff: i64,
    pub total_online_balance: i64,
    /// 收银现金 - 应有余额，负数为短款
    pub over_short: i64,
}

/// 每日对账。纯函数，相同输入总是得到相同输出，可随时从已存储数据重新计算。
pub fn reconcile(
    today: &OnlineFigures,
    yesterday: &OnlineFigures,
    ticket_totals: &[i64],
    register_cash: i64,
) -> Reconciliation {
    let instant_sale_sr34: i64 = ticket_totals.iter().sum();
    let online_sales_diff = today.online_net_sales - yesterday.online_net_sales;
    let online_cashing_diff = today.online_cashing - yesterday.online_cashing;
    let instant_cashing_diff = today.instant_cashing - yesterday.instant_cashing;
    let total_online_balance =
        online_sales_diff - online_cashing_diff - instant_cashing_diff + instant_sale_sr34;

    Reconciliation {
        instant_sale_sr34,
        online_sales_diff,
        online_cashing_diff,
        instant_cashing_diff,
        total_online_balance,
        over_short: register_cash - total_online_balance,
    }
}
