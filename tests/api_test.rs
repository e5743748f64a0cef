use std::io::Read;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use flate2::read::GzDecoder;
use serde_json::{Value, json};

use occupancy_grid_backend::app_state::AppState;
use occupancy_grid_backend::config::ServerConfig;
use occupancy_grid_backend::encoders::RAW_MAGIC;
use occupancy_grid_backend::routes;

fn rows() -> Value {
    json!([
        [0, 3, 0.0, 5.0, 0.0],
        [1, 3, 1.0, 5.0, 4.0],
        [2, 3, 2.0, 5.0, 8.0],
        [3, 4, 9.0, 9.0, 9.0],
        [4, 1, -3.0, 2.0, 1.0]
    ])
}

fn state(config: ServerConfig) -> web::Data<AppState> {
    web::Data::new(AppState::new(config))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::configure($state.config.max_upload_bytes)),
        )
        .await
    };
}

macro_rules! upload {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/snapshots")
            .set_json(json!({ "label": "10ns", "rows": rows() }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["snapshot_id"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn upload_reports_type_counts() {
    let state = state(ServerConfig::default());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/snapshots")
        .set_json(json!({ "label": "10ns", "rows": rows() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["label"], "10ns");
    assert_eq!(body["particle_count"], 5);
    assert_eq!(body["type_counts"], json!({ "H": 1, "N": 3, "Na": 1 }));
    assert_eq!(state.snapshot_store.snapshot_count(), 1);
}

#[actix_web::test]
async fn upload_rejects_short_rows() {
    let state = state(ServerConfig::default());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/snapshots")
        .set_json(json!({ "rows": [[0, 1, 0.0, 0.0]] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.snapshot_store.snapshot_count(), 0);
}

#[actix_web::test]
async fn json_front_view_of_nitrogen() {
    let state = state(ServerConfig::default());
    let app = app!(state);
    let id = upload!(app);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/occupancy?snapshot_id={}&atom_type=N&projection=front&resolution=3",
            id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Grid-Rows").unwrap(), "3");
    assert_eq!(resp.headers().get("X-Grid-Total").unwrap(), "3");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["shape"], json!([3, 3]));
    assert_eq!(body["x_edges"], json!([0.0, 1.0, 2.0]));
    assert_eq!(body["y_edges"], json!([0.0, 4.0, 8.0]));
    assert_eq!(body["counts"], json!([[1, 0, 0], [0, 1, 0], [0, 0, 1]]));
    assert_eq!(body["selector"], "N");
    assert_eq!(body["axes"], json!(["x", "z"]));
    assert_eq!(body["selected"], 3);
}

#[actix_web::test]
async fn default_resolution_applies_when_omitted() {
    let mut config = ServerConfig::default();
    config.default_resolution = 4;
    let state = state(config);
    let app = app!(state);
    let id = upload!(app);

    let req = test::TestRequest::get()
        .uri(&format!("/occupancy?snapshot_id={}&atom_type=all", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["shape"], json!([4, 4]));
    assert_eq!(body["total"], 5);
    assert_eq!(body["projection"], "top");
}

#[actix_web::test]
async fn binary_formats_share_one_container() {
    let state = state(ServerConfig::default());
    let app = app!(state);
    let id = upload!(app);

    let raw_req = test::TestRequest::get()
        .uri(&format!("/occupancy?snapshot_id={}&resolution=2&format=bin", id))
        .to_request();
    let raw_resp = test::call_service(&app, raw_req).await;
    assert_eq!(raw_resp.status(), StatusCode::OK);
    assert_eq!(
        raw_resp.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
    let raw = test::read_body(raw_resp).await;
    assert_eq!(&raw[..4], RAW_MAGIC);
    // 16 字节头 + 2 + 2 个 f64 边界 + 4 个 u64 计数
    assert_eq!(raw.len(), 16 + 4 * 8 + 4 * 8);

    let gz_req = test::TestRequest::get()
        .uri(&format!("/occupancy?snapshot_id={}&resolution=2&format=BIN.GZ", id))
        .to_request();
    let gz = test::call_and_read_body(&app, gz_req).await;
    let mut decompressed = Vec::new();
    GzDecoder::new(gz.as_ref())
        .read_to_end(&mut decompressed)
        .unwrap();
    assert_eq!(decompressed, raw.to_vec());
}

#[actix_web::test]
async fn invalid_queries_are_rejected() {
    let state = state(ServerConfig::default());
    let app = app!(state);
    let id = upload!(app);

    for query in [
        format!("snapshot_id={}&atom_type=X", id),
        format!("snapshot_id={}&atom_type=6", id),
        format!("snapshot_id={}&projection=diagonal", id),
        format!("snapshot_id={}&resolution=0", id),
        format!("snapshot_id={}&resolution=100000", id),
        format!("snapshot_id={}&format=png", id),
        // 快照中没有 Cl
        format!("snapshot_id={}&atom_type=Cl", id),
    ] {
        let req = test::TestRequest::get()
            .uri(&format!("/occupancy?{}", query))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "query: {}", query);
    }
}

#[actix_web::test]
async fn unknown_and_deleted_snapshots_are_not_found() {
    let state = state(ServerConfig::default());
    let app = app!(state);
    let id = upload!(app);

    let req = test::TestRequest::delete()
        .uri(&format!("/snapshots/{}", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/snapshots/{}", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri(&format!("/occupancy?snapshot_id={}", id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn index_lists_formats_and_atom_types() {
    let state = state(ServerConfig::default());
    let app = app!(state);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["supported_formats"],
        json!(["bin", "bin.gz", "gz", "json", "raw"])
    );
    assert_eq!(body["atom_types"][3], json!({ "symbol": "Na", "code": 4 }));
}

/// 构造 n 行快照数据，序列化后的请求体大小
fn large_upload(n: usize) -> (Value, usize) {
    let rows: Vec<Value> = (0..n)
        .map(|i| {
            let v = i as f64 * 0.001_234_567;
            json!([i, (i % 5) + 1, v, v + 12.345_678, v - 98.765_432])
        })
        .collect();
    let body = json!({ "label": "10ns", "rows": rows });
    let size = serde_json::to_vec(&body).unwrap().len();
    (body, size)
}

#[actix_web::test]
async fn realistic_snapshot_above_two_mib_is_stored() {
    let state = state(ServerConfig::default());
    let app = app!(state);

    let (body, size) = large_upload(60_000);
    assert!(size > 2 * 1024 * 1024, "payload only {} bytes", size);

    let req = test::TestRequest::post()
        .uri("/snapshots")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["particle_count"], 60_000);
    assert_eq!(body["type_counts"]["Cl"], 12_000);
}

#[actix_web::test]
async fn upload_limit_follows_config() {
    let mut config = ServerConfig::default();
    config.max_upload_bytes = 1024;
    let state = state(config);
    let app = app!(state);

    let (body, size) = large_upload(100);
    assert!(size > 1024);

    let req = test::TestRequest::post()
        .uri("/snapshots")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(state.snapshot_store.snapshot_count(), 0);
}

#[actix_web::test]
async fn label_defaults_when_omitted() {
    let state = state(ServerConfig::default());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/snapshots")
        .set_json(json!({ "rows": rows() }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["label"], "snapshot");
}
