#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use popdash_api::config::ServerConfig;
use popdash_api::router::build_app_router;
use popdash_api::state::AppState;
use popdash_db::models::{CreateCommercialSample, CreatePopulationSample};
use popdash_db::repositories::{CommercialRepo, PopulationRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Static files come from `tests/fixtures/public`, relative to the crate
/// root where `cargo test` runs.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: "tests/fixtures/public".to_string(),
        default_window_hours: 24,
        db_max_connections: 5,
    }
}

/// Build the full application router through the same builder `main.rs`
/// uses, so tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to `uri`.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub const MYEONGDONG: &str = "명동 관광특구";
pub const HONGDAE: &str = "홍대 관광특구";

/// A population sample for today, ingested `ago` before now.
pub fn population(area: &str, hour: i16, minute: i16, max: f64, ago: Duration) -> CreatePopulationSample {
    CreatePopulationSample {
        area_nm: area.to_string(),
        reg_date: Utc::now().date_naive(),
        reg_date_hour: hour,
        reg_date_minute: minute,
        ppltn_min: max - 100.0,
        ppltn_max: max,
        reg_sysdate: Some(Utc::now() - ago),
    }
}

/// A commercial sample for today, ingested an hour ago.
pub fn commercial(area: &str, hour: i16, category: &str, amount: f64) -> CreateCommercialSample {
    CreateCommercialSample {
        area_nm: area.to_string(),
        reg_date: Utc::now().date_naive(),
        reg_hour: hour,
        reg_date_minute: 0,
        rsb_lrg_ctgr: category.to_string(),
        rsb_sh_payment_amt_max: amount,
        reg_sysdate: Some(Utc::now() - Duration::hours(1)),
    }
}

pub async fn seed_population(pool: &PgPool, rows: &[CreatePopulationSample]) {
    for row in rows {
        PopulationRepo::insert(pool, row).await.unwrap();
    }
}

pub async fn seed_commercial(pool: &PgPool, rows: &[CreateCommercialSample]) {
    for row in rows {
        CommercialRepo::insert(pool, row).await.unwrap();
    }
}
