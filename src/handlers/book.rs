use super::actor_id_from_request;
use crate::models::*;
use crate::services::InventoryService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/lottery/books",
    tag = "lottery_book",
    request_body = BookLifecycleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "票本入库成功", body = BookResponse),
        (status = 400, description = "票本号格式错误"),
        (status = 404, description = "游戏不存在"),
        (status = 409, description = "票本已存在")
    )
)]
/// 票本入库，状态为 available
pub async fn add_book(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    request: web::Json<BookLifecycleRequest>,
) -> Result<HttpResponse> {
    let actor_id = match actor_id_from_request(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .add_to_inventory(request.store_id, &request.book_number, actor_id)
        .await
    {
        Ok(book) => Ok(HttpResponse::Ok().json(ApiResponse::success(book))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lottery/books/activate",
    tag = "lottery_book",
    request_body = BookLifecycleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "票本激活成功", body = BookResponse),
        (status = 400, description = "票本号格式错误，应为 GGG-BBBBBB-R"),
        (status = 404, description = "游戏不存在，需先创建游戏"),
        (status = 409, description = "票本已激活")
    )
)]
/// 激活票本:
/// 1. 票本不存在时直接创建为 activated
/// 2. 已退回 / 已售罄的票本可重新激活并覆盖参考号
/// 3. 已激活的票本拒绝再次激活
pub async fn activate_book(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    request: web::Json<BookLifecycleRequest>,
) -> Result<HttpResponse> {
    let actor_id = match actor_id_from_request(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .activate(request.store_id, &request.book_number, actor_id)
        .await
    {
        Ok(book) => Ok(HttpResponse::Ok().json(ApiResponse::success(book))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lottery/books/return",
    tag = "lottery_book",
    request_body = BookLifecycleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "票本退回成功", body = BookResponse),
        (status = 400, description = "票本号格式错误，应为 GGG-BBBBBB"),
        (status = 404, description = "没有对应的已激活票本")
    )
)]
/// 退回已激活的票本
pub async fn return_book(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    request: web::Json<BookLifecycleRequest>,
) -> Result<HttpResponse> {
    let actor_id = match actor_id_from_request(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .return_book(request.store_id, &request.book_number, actor_id)
        .await
    {
        Ok(book) => Ok(HttpResponse::Ok().json(ApiResponse::success(book))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lottery/books/sold",
    tag = "lottery_book",
    request_body = BookLifecycleRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "票本已标记售罄", body = BookResponse),
        (status = 400, description = "票本号格式错误，应为 GGG-BBBBBB"),
        (status = 404, description = "没有对应的已激活票本")
    )
)]
pub async fn mark_book_sold(
    service: web::Data<InventoryService>,
    req: HttpRequest,
    request: web::Json<BookLifecycleRequest>,
) -> Result<HttpResponse> {
    let actor_id = match actor_id_from_request(&req) {
        Ok(id) => id,
        Err(e) => return Ok(e.error_response()),
    };
    match service
        .mark_sold(request.store_id, &request.book_number, actor_id)
        .await
    {
        Ok(book) => Ok(HttpResponse::Ok().json(ApiResponse::success(book))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lottery/stores/{store_id}/books",
    tag = "lottery_book",
    params(
        ("store_id" = i64, Path, description = "门店ID"),
        ("status" = Option<String>, Query, description = "按状态过滤: available / activated / sold / returned / settled"),
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取票本列表成功", body = BookPage)
    )
)]
/// 分页获取门店票本（按更新时间倒序）
pub async fn list_books(
    service: web::Data<InventoryService>,
    path: web::Path<i64>,
    query: web::Query<BookListQuery>,
) -> Result<HttpResponse> {
    match service.list_books(path.into_inner(), &query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn book_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/books", web::post().to(add_book))
        .route("/books/activate", web::post().to(activate_book))
        .route("/books/return", web::post().to(return_book))
        .route("/books/sold", web::post().to(mark_book_sold))
        .route("/stores/{store_id}/books", web::get().to(list_books));
}
