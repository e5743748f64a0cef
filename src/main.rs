use std::time::Duration;

use actix_web::{App, HttpServer, web};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use occupancy_grid_backend::app_state::AppState;
use occupancy_grid_backend::config::ServerConfig;
use occupancy_grid_backend::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,occupancy_grid_backend=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let app_state = web::Data::new(AppState::new(config.clone()));
    info!(
        formats = ?app_state.encoder_registry.supported_formats(),
        "已注册的编码器"
    );

    // 启动后台清理任务：定期清理过期的快照，避免长期占用内存
    let cleanup_store = app_state.snapshot_store.clone();
    let cleanup_interval = config.cleanup_interval.max(Duration::from_secs(1));
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let cleaned_count = cleanup_store.cleanup_expired();
            if cleaned_count > 0 {
                info!(
                    cleaned_count,
                    remaining = cleanup_store.snapshot_count(),
                    "[清理任务] 清理了过期快照"
                );
            }
        }
    });

    info!(
        host = %config.host,
        port = config.port,
        snapshot_ttl_min = app_state.snapshot_store.default_ttl().as_secs() / 60,
        max_upload_bytes = config.max_upload_bytes,
        default_resolution = config.default_resolution,
        "服务器启动"
    );

    let max_upload_bytes = config.max_upload_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure(max_upload_bytes))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
