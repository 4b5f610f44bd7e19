use crate::models::*;
use crate::services::GameService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/lottery/games",
    tag = "lottery_game",
    request_body = CreateGameRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建游戏成功", body = GameResponse),
        (status = 400, description = "参数错误"),
        (status = 409, description = "游戏编号已存在")
    )
)]
/// 新建彩票游戏
pub async fn create_game(
    service: web::Data<GameService>,
    request: web::Json<CreateGameRequest>,
) -> Result<HttpResponse> {
    match service.create_game(request.into_inner()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::success(game))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lottery/games",
    tag = "lottery_game",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取游戏列表成功", body = [GameResponse])
    )
)]
/// 所有启用的游戏
pub async fn list_games(service: web::Data<GameService>) -> Result<HttpResponse> {
    match service.list_games().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lottery/games/{game_number}",
    tag = "lottery_game",
    params(
        ("game_number" = String, Path, description = "三位游戏编号")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取游戏成功", body = GameResponse),
        (status = 404, description = "游戏不存在")
    )
)]
pub async fn get_game(
    service: web::Data<GameService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match service.get_game(&path.into_inner()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::success(game))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn game_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/games", web::post().to(create_game))
        .route("/games", web::get().to(list_games))
        .route("/games/{game_number}", web::get().to(get_game));
}
