pub mod audit;
pub mod book;
pub mod game;
pub mod reconcile;
pub mod report;

use crate::error::AppError;
use actix_web::{HttpMessage, HttpRequest, web};

pub use audit::audit_config;
pub use book::book_config;
pub use game::game_config;
pub use reconcile::reconcile_config;
pub use report::report_config;

/// 从请求扩展中获取操作员ID（中间件在鉴权后注入）
pub(crate) fn actor_id_from_request(req: &HttpRequest) -> Result<i64, AppError> {
    req.extensions()
        .get::<i64>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Missing authenticated user".to_string()))
}

/// 彩票业务路由，挂载在 /lottery 下
pub fn lottery_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/lottery")
            .configure(game_config)
            .configure(book_config)
            .configure(report_config)
            .configure(reconcile_config)
            .configure(audit_config),
    );
}
