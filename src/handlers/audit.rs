use crate::models::*;
use crate::services::AuditService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/lottery/stores/{store_id}/audit-logs",
    tag = "lottery_audit",
    params(
        ("store_id" = i64, Path, description = "门店ID"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取审计记录成功", body = AuditLogPage)
    )
)]
/// 分页获取门店票本操作审计记录（倒序）
pub async fn list_audit_logs(
    service: web::Data<AuditService>,
    path: web::Path<i64>,
    query: web::Query<AuditLogQuery>,
) -> Result<HttpResponse> {
    match service.list(path.into_inner(), &query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn audit_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/stores/{store_id}/audit-logs", web::get().to(list_audit_logs));
}
