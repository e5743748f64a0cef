use actix_web::web;

use crate::handlers;

/// 统一注册 HTTP 路由，方便集中管理
/// max_upload_bytes 限制 JSON 请求体大小（快照上传）
pub fn configure(max_upload_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::JsonConfig::default().limit(max_upload_bytes))
            .service(handlers::hello)
            .service(handlers::upload_snapshot)
            .service(handlers::delete_snapshot)
            .service(handlers::get_occupancy);
    }
}
