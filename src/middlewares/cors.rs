use actix_cors::Cors;

/// 门店收银端与后台均为浏览器访问，放行所有来源，由令牌鉴权
pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
