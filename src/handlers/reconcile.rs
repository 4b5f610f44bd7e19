use crate::lottery::{Reconciliation, reconcile};
use crate::models::*;
use actix_web::{HttpResponse, Result, web};

#[utoipa::path(
    post,
    path = "/lottery/reconcile",
    tag = "lottery_report",
    request_body = ReconcileRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "对账结果（不落库）", body = Reconciliation)
    )
)]
/// 按给定数据临时对账，不读写数据库
pub async fn reconcile_figures(request: web::Json<ReconcileRequest>) -> Result<HttpResponse> {
    let request = request.into_inner();
    let result = reconcile(
        &request.today,
        &request.yesterday,
        &request.ticket_totals,
        request.register_cash,
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

pub fn reconcile_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/reconcile", web::post().to(reconcile_figures));
}
