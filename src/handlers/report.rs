use crate::models::*;
use crate::services::{DailyReportService, ScanService};
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    put,
    path = "/lottery/reports",
    tag = "lottery_report",
    request_body = UpsertDailyReportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "保存日报表成功", body = DailyReportResponse)
    )
)]
/// 创建或更新门店当日报表（门店 + 日期唯一），保存后重新对账
pub async fn upsert_report(
    service: web::Data<DailyReportService>,
    request: web::Json<UpsertDailyReportRequest>,
) -> Result<HttpResponse> {
    match service.upsert_report(request.into_inner()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(report))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lottery/reports/{report_id}",
    tag = "lottery_report",
    params(
        ("report_id" = i64, Path, description = "日报表ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取日报表成功", body = DailyReportResponse),
        (status = 404, description = "日报表不存在")
    )
)]
pub async fn get_report(
    service: web::Data<DailyReportService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_report(path.into_inner()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(report))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lottery/reports/{report_id}/recalculate",
    tag = "lottery_report",
    params(
        ("report_id" = i64, Path, description = "日报表ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "重新对账成功", body = DailyReportResponse),
        (status = 404, description = "日报表不存在")
    )
)]
/// 由已存储的报表数据与扫描记录重新计算派生字段
pub async fn recalculate_report(
    service: web::Data<DailyReportService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.recalculate(path.into_inner()).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(report))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lottery/reports/{report_id}/scans",
    tag = "lottery_report",
    params(
        ("report_id" = i64, Path, description = "日报表ID")
    ),
    request_body = ScanTicketRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "扫描成功", body = ScannedTicketResponse),
        (status = 400, description = "票号格式错误，应为 GGG-BBBBBB-TTT"),
        (status = 404, description = "游戏 / 报表 / 已激活票本不存在"),
        (status = 409, description = "当日已扫描或票号倒序（details 中给出上次票号）"),
        (status = 422, description = "售出数量不合法"),
        (status = 504, description = "查找上次扫描记录超时")
    )
)]
/// 扫描票号:
/// 1. 同一票本每个报表日期只能扫描一次
/// 2. 以上次扫描票号（或票本参考号）为起点计算售出数量
/// 3. 写入扫描记录并重新对账
pub async fn scan_ticket(
    service: web::Data<ScanService>,
    path: web::Path<i64>,
    request: web::Json<ScanTicketRequest>,
) -> Result<HttpResponse> {
    match service.scan(path.into_inner(), &request.ticket_number).await {
        Ok(scan) => Ok(HttpResponse::Ok().json(ApiResponse::success(scan))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lottery/reports/{report_id}/scans",
    tag = "lottery_report",
    params(
        ("report_id" = i64, Path, description = "日报表ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取扫描记录成功", body = [ScannedTicketResponse]),
        (status = 404, description = "日报表不存在")
    )
)]
pub async fn list_scans(
    service: web::Data<ScanService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.list_scans(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn report_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports", web::put().to(upsert_report))
        .route("/reports/{report_id}", web::get().to(get_report))
        .route(
            "/reports/{report_id}/recalculate",
            web::post().to(recalculate_report),
        )
        .route("/reports/{report_id}/scans", web::post().to(scan_ticket))
        .route("/reports/{report_id}/scans", web::get().to(list_scans));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LotteryConfig;
    use actix_web::{App, http::StatusCode, test};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_scan_malformed_ticket_returns_400() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ScanService::new(db, LotteryConfig::default())))
                .configure(report_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/reports/1/scans")
            .set_json(serde_json::json!({ "ticket_number": "123-45678-120" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    }
}
