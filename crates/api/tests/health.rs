//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["default_window_hours"], 24);
    assert_eq!(json["population_rows"], 0);
}

// ---------------------------------------------------------------------------
// Test: health reports how many population samples are stored
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_counts_population_rows(pool: PgPool) {
    common::seed_population(
        &pool,
        &[
            common::population(common::MYEONGDONG, 10, 0, 1000.0, chrono::Duration::hours(1)),
            common::population(common::HONGDAE, 10, 0, 2000.0, chrono::Duration::hours(30)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/health").await).await;

    assert_eq!(json["population_rows"], 2);
}

// ---------------------------------------------------------------------------
// Test: unknown API route returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_api_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: paths outside /api fall through to static files
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn root_serves_static_index(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<canvas id=\"population\">"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_static_file_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/missing.js").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID: {id_str}");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight allows GET from the configured origin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/areas")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:5173"
    );
}
