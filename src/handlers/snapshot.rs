use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::snapshot::SnapshotData;
use crate::utils::extractor::AtomType;
use crate::utils::particle_table::ParticleTable;

#[derive(Deserialize)]
pub struct UploadSnapshotRequest {
    /// 快照标签，例如 "10ns"
    pub label: Option<String>,
    /// 原始数值行: [id, type, x, y, z, ...]
    pub rows: Vec<Vec<f64>>,
}

#[derive(Serialize)]
pub struct UploadSnapshotResponse {
    pub snapshot_id: String,
    pub label: String,
    pub particle_count: usize,
    /// 原子符号（未知代码用数字表示）-> 粒子数
    pub type_counts: BTreeMap<String, usize>,
}

/// 上传某一时刻的粒子表，返回 snapshot_id 供后续网格查询使用
#[post("/snapshots")]
pub async fn upload_snapshot(
    data: web::Data<AppState>,
    payload: web::Json<UploadSnapshotRequest>,
) -> impl Responder {
    let payload = payload.into_inner();
    let table = match ParticleTable::from_rows(&payload.rows) {
        Ok(table) => table,
        Err(e) => {
            warn!(error = %e, "快照数据无效");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "快照数据无效",
                "details": e.to_string(),
            }));
        }
    };

    let type_counts = table
        .count_by_type()
        .into_iter()
        .map(|(code, count)| {
            let name = AtomType::from_code(code)
                .map(|atom| atom.symbol().to_string())
                .unwrap_or_else(|_| code.to_string());
            (name, count)
        })
        .collect();

    let label = payload.label.unwrap_or_else(|| "snapshot".to_string());
    let particle_count = table.len();
    let snapshot_id = data
        .snapshot_store
        .insert(SnapshotData::new(label.clone(), table));

    info!(%snapshot_id, %label, particle_count, "快照已保存");

    HttpResponse::Ok().json(UploadSnapshotResponse {
        snapshot_id,
        label,
        particle_count,
        type_counts,
    })
}

/// 主动删除快照，释放内存
#[delete("/snapshots/{snapshot_id}")]
pub async fn delete_snapshot(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let snapshot_id = path.into_inner();
    match data.snapshot_store.remove(&snapshot_id) {
        Some(_) => {
            info!(%snapshot_id, "快照已删除");
            HttpResponse::NoContent().finish()
        }
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "无效的 snapshot_id",
            "snapshot_id": snapshot_id,
        })),
    }
}
