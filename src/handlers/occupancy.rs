use std::time::Instant;

use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::app_state::AppState;
use crate::error::GridError;
use crate::utils::extractor::{Projection, TypeSelector};
use crate::utils::occupancy_grid::build_occupancy_grid;
use crate::utils::progress::TracingProgress;

#[derive(Deserialize)]
pub struct OccupancyQuery {
    pub snapshot_id: String,
    /// "all"、原子符号或类型代码，默认 "all"
    pub atom_type: Option<String>,
    /// top / front / side，默认 top
    pub projection: Option<String>,
    /// 每轴分箱数，默认取配置中的 default_resolution
    pub resolution: Option<usize>,
    /// 输出格式，默认 json
    pub format: Option<String>,
}

/// 编码完成的网格
pub struct EncodedOccupancy {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub total: u64,
}

/// 占据网格接口
/// 例如: /occupancy?snapshot_id=xxx&atom_type=N&projection=front&resolution=50&format=json
#[get("/occupancy")]
pub async fn get_occupancy(
    data: web::Data<AppState>,
    query: web::Query<OccupancyQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let snapshot_id = query.snapshot_id.clone();

    let encoded = match run_occupancy(data, query).await {
        Ok(encoded) => encoded,
        Err(resp) => return resp,
    };

    HttpResponse::Ok()
        .content_type(encoded.content_type)
        .append_header(("X-Grid-Rows", encoded.rows.to_string()))
        .append_header(("X-Grid-Cols", encoded.cols.to_string()))
        .append_header(("X-Grid-Total", encoded.total.to_string()))
        .append_header(("X-Snapshot-Id", snapshot_id))
        .body(encoded.bytes)
}

/// 校验查询参数，在阻塞线程池中完成分箱与编码
///
/// ## 返回
/// - `Ok(EncodedOccupancy)`: 编码后的网格及其形状
/// - `Err(HttpResponse)`: 参数错误 (400)、快照不存在 (404) 或内部错误 (500)
pub async fn run_occupancy(
    app_state: web::Data<AppState>,
    query: OccupancyQuery,
) -> Result<EncodedOccupancy, HttpResponse> {
    // ==================== 步骤 1: 解析筛选条件与视角 ====================
    let selector = query
        .atom_type
        .as_deref()
        .unwrap_or("all")
        .parse::<TypeSelector>()
        .map_err(|e| bad_request("atom_type 无效", &e))?;

    let projection = match query.projection.as_deref() {
        Some(name) => name
            .parse::<Projection>()
            .map_err(|e| bad_request("projection 无效", &e))?,
        None => Projection::default(),
    };

    let resolution = query
        .resolution
        .unwrap_or(app_state.config.default_resolution);
    if resolution == 0 || resolution > app_state.config.max_resolution {
        return Err(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "resolution 超出范围",
            "resolution": resolution,
            "max_resolution": app_state.config.max_resolution,
        })));
    }

    // ==================== 步骤 2: 查找编码器 ====================
    let format = query.format.as_deref().unwrap_or("json");
    if app_state.encoder_registry.find_encoder(format).is_none() {
        return Err(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "不支持的输出格式",
            "format": format,
            "supported_formats": app_state.encoder_registry.supported_formats(),
        })));
    }
    let format = format.to_string();

    // ==================== 步骤 3: 查找快照 ====================
    let Some(snapshot) = app_state.snapshot_store.get(&query.snapshot_id) else {
        return Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": "无效的 snapshot_id",
            "snapshot_id": query.snapshot_id,
        })));
    };

    // ==================== 步骤 4: 分箱并编码 ====================
    // 分箱是纯 CPU 计算，放到阻塞线程池中执行，不占用 worker
    let registry = app_state.encoder_registry.clone();
    let snapshot_id = query.snapshot_id;
    let result = web::block(move || -> Result<EncodedOccupancy, GridError> {
        let started = Instant::now();
        let label = format!("{}/{}", snapshot.label, selector);
        let mut progress = TracingProgress::new(&label);
        let grid = build_occupancy_grid(
            &snapshot.table,
            selector,
            projection,
            resolution,
            &mut progress,
        )?;

        let Some(encoder) = registry.find_encoder(&format) else {
            return Err(GridError::invalid(format!("不支持的输出格式: {}", format)));
        };
        let bytes = encoder.encode(&grid)?;
        let (rows, cols) = grid.shape();

        info!(
            %snapshot_id,
            selector = %selector,
            projection = projection.name(),
            resolution,
            selected = grid.selected,
            encoder = encoder.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "网格生成完成"
        );

        Ok(EncodedOccupancy {
            bytes,
            content_type: encoder.content_type(),
            rows,
            cols,
            total: grid.counts.total(),
        })
    })
    .await;

    match result {
        Ok(Ok(encoded)) => Ok(encoded),
        Ok(Err(e)) if e.is_invalid_argument() => Err(bad_request("无法生成网格", &e)),
        Ok(Err(e)) => {
            error!(error = %e, "网格编码失败");
            Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "网格编码失败",
                "details": e.to_string(),
            })))
        }
        Err(e) => {
            error!(error = %e, "分箱任务执行失败");
            Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "分箱任务执行失败",
                "details": e.to_string(),
            })))
        }
    }
}

fn bad_request(message: &str, err: &GridError) -> HttpResponse {
    debug!(error = %err, "{}", message);
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": message,
        "details": err.to_string(),
    }))
}
