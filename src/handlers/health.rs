use actix_web::{HttpResponse, Responder, get, web};

use crate::app_state::AppState;
use crate::utils::extractor::AtomType;

/// 根路径健康检查/服务说明
#[get("/")]
pub async fn hello(data: web::Data<AppState>) -> impl Responder {
    let supported = data.encoder_registry.supported_formats();
    let atom_types: Vec<_> = AtomType::ALL
        .iter()
        .map(|atom| serde_json::json!({ "symbol": atom.symbol(), "code": atom.code() }))
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "message": "粒子占据网格服务",
        "endpoints": [
            "POST /snapshots",
            "DELETE /snapshots/{snapshot_id}",
            "GET /occupancy?snapshot_id=<id>&atom_type=<type>&projection=<top|front|side>&resolution=<n>&format=<format>",
        ],
        "supported_formats": supported,
        "atom_types": atom_types,
        "default_resolution": data.config.default_resolution,
        "max_resolution": data.config.max_resolution,
        "snapshot_count": data.snapshot_store.snapshot_count(),
    }))
}
