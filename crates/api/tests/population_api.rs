//! HTTP-level tests for the population endpoints.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{body_json, get, population, seed_population, HONGDAE, MYEONGDONG};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Areas
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn areas_lists_fixed_area_names(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/areas").await).await;

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["AREA_NM"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 8);
    assert!(names.contains(&MYEONGDONG));
}

// ---------------------------------------------------------------------------
// Hourly averages and window
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn hourly_population_on_empty_store_is_empty_array(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/population").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hourly_population_averages_within_window(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 10, 0, 1000.0, Duration::hours(1)),
            population(HONGDAE, 10, 0, 3000.0, Duration::hours(1)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/main-page-hourly-population").await).await;

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["REG_DATE_HOUR"], 10);
    assert_eq!(rows[0]["CNT"], 2000.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hours_param_narrows_window(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 10, 0, 1000.0, Duration::hours(1)),
            population(MYEONGDONG, 5, 0, 9000.0, Duration::hours(5)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/population?hours=2").await).await;

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["REG_DATE_HOUR"], 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rows_older_than_default_window_are_excluded(pool: PgPool) {
    seed_population(&pool, &[population(MYEONGDONG, 10, 0, 1000.0, Duration::hours(25))]).await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/population").await).await;

    assert!(json.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_hours_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/population?hours=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/population?hours=169").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_query_is_rejected_with_json_body(pool: PgPool) {
    for uri in [
        "/api/population?hours=abc",
        "/api/population/by-area?granularity=second",
        "/api/population/detail?hours=-1",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "{uri}"
        );

        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST", "{uri}");
        assert!(json["error"].as_str().unwrap().contains("query string"), "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Per-area samples
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn by_area_filters_by_comma_separated_areas(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 10, 0, 1000.0, Duration::hours(1)),
            population(HONGDAE, 10, 0, 2000.0, Duration::hours(1)),
            population("잠실 관광특구", 10, 0, 3000.0, Duration::hours(1)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let uri = format!(
        "/api/population/by-area?area={},{}",
        urlencode(MYEONGDONG),
        urlencode(HONGDAE)
    );
    let json = body_json(get(app, &uri).await).await;

    let mut areas: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["AREA_NM"].as_str().unwrap())
        .collect();
    areas.sort();
    assert_eq!(areas, vec![MYEONGDONG, HONGDAE]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn by_area_minute_granularity_keeps_sub_hour_buckets(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 10, 0, 1000.0, Duration::hours(1)),
            population(MYEONGDONG, 10, 30, 1200.0, Duration::hours(1)),
        ],
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let hourly = body_json(get(app, "/api/population/by-area").await).await;
    assert_eq!(hourly.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let minute = body_json(get(app, "/api/population/by-area?granularity=minute").await).await;
    assert_eq!(minute.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Latest bucket, detail and summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn area_now_reports_latest_bucket(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 9, 0, 500.0, Duration::hours(2)),
            population(MYEONGDONG, 10, 0, 1000.0, Duration::minutes(5)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/population/area-now").await).await;

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["AREA_NM"], MYEONGDONG);
    assert_eq!(rows[0]["CNT"], 1000.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_returns_three_sections(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 9, 0, 500.0, Duration::hours(1)),
            population(MYEONGDONG, 10, 0, 1000.0, Duration::hours(1)),
            population(HONGDAE, 10, 0, 2000.0, Duration::hours(1)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/population/detail").await).await;

    assert_eq!(json["totalData"].as_array().unwrap().len(), 3);
    assert_eq!(json["areaData"].as_array().unwrap().len(), 2);
    assert_eq!(json["hourlyAvg"].as_array().unwrap().len(), 2);
    assert!(json["areaData"]
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["HOUR"] == 10));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_compares_latest_two_hours(pool: PgPool) {
    seed_population(
        &pool,
        &[
            population(MYEONGDONG, 9, 0, 1000.0, Duration::minutes(30)),
            population(MYEONGDONG, 10, 0, 2000.0, Duration::minutes(30)),
        ],
    )
    .await;
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/population/summary").await).await;

    assert_eq!(json["current"], 2000.0);
    assert_eq!(json["previous"], 1000.0);
    assert_eq!(json["change_pct"], 100.0);
    assert_eq!(json["change_label"], "+100.0%");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_without_data_is_unavailable(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/population/summary").await).await;

    assert!(json["current"].is_null());
    assert!(json["change_pct"].is_null());
    assert_eq!(json["change_label"], "N/A");
}

// ---------------------------------------------------------------------------
// Placeholder demographics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn placeholder_demographics_have_fixed_shape(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let gender = body_json(get(app, "/api/population/gender-ratio").await).await;
    assert_eq!(gender.as_array().unwrap().len(), 2);
    assert!(gender[0]["count"].is_u64());

    let app = common::build_test_app(pool);
    let ages = body_json(get(app, "/api/population/age-distribution").await).await;
    assert_eq!(ages.as_array().unwrap().len(), 6);
    assert_eq!(ages[0]["age_group"], "10대");
}

/// Percent-encode a query value.
fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}
