//! Drive the router in-process with `oneshot`.

use std::sync::Arc;

use agrodata::cache::CacheStore;
use agrodata::service::test_support::FixedClock;
use agrodata::service::{AgDataService, StaticProvider};
use agrodata::{router, AppState, Refresher};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

const API_KEY: &str = "test-secret";

struct Harness {
    app: Router,
    service: Arc<AgDataService>,
    refresher: Refresher,
}

fn harness() -> Harness {
    let clock = Arc::new(FixedClock::at(2026, 1, 20));
    let provider = Arc::new(StaticProvider::new(clock.clone()));
    let service = Arc::new(AgDataService::new(provider, CacheStore::in_memory(), clock));
    service.initialize();
    let refresher = Refresher::new(service.clone());
    let app = router(
        AppState::new(service.clone(), refresher.clone(), API_KEY),
        &["*".to_string()],
    );
    Harness {
        app,
        service,
        refresher,
    }
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

#[tokio::test]
async fn root_lists_endpoints() {
    let h = harness();
    let (status, body) = get(&h.app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Brazil Agricultural Data API");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["endpoints"]["dashboard"], "/api/v1/dashboard/summary");
}

#[tokio::test]
async fn balance_sheet_two_most_recent_years() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/balance-sheet/soybeans?years=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["commodity"], "soybeans");

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["year"], "2024/25");
    assert_eq!(rows[1]["year"], "2025/26");
    assert_eq!(rows[1]["isProjection"], true);
    assert!(rows[0]["openingStock"].is_number());
}

#[tokio::test]
async fn balance_sheet_years_out_of_range() {
    let h = harness();
    for uri in [
        "/api/v1/balance-sheet/corn?years=0",
        "/api/v1/balance-sheet/corn?years=21",
        "/api/v1/balance-sheet/corn?years=abc",
    ] {
        let (status, body) = get(&h.app, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn unknown_commodity_rejected_before_resolver() {
    let h = harness();
    for uri in [
        "/api/v1/balance-sheet/barley",
        "/api/v1/exports/monthly/cotton",
        "/api/v1/prices/Soybeans",
    ] {
        let (status, _) = get(&h.app, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
    assert_eq!(h.service.store().entry_count(), 0);
}

#[tokio::test]
async fn monthly_exports_past_year_has_no_partial_rows() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/exports/monthly/corn?year=2025").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ncmCode"], "1005");
    assert!(body["last_updated"].is_string());
    assert!(body["ytdToChinaMmt"].is_null());

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r["isPartial"] == false));
}

#[tokio::test]
async fn monthly_exports_year_range_enforced() {
    let h = harness();
    let (status, _) = get(&h.app, "/api/v1/exports/monthly/soybeans?year=1999").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = get(&h.app, "/api/v1/exports/monthly/soybeans?year=2031").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn soybean_exports_carry_china_split_unless_disabled() {
    let h = harness();
    let (_, with_china) = get(&h.app, "/api/v1/exports/monthly/soybeans?year=2024").await;
    assert_eq!(with_china["ytdToChinaMmt"], 77.46);

    let (_, without) = get(
        &h.app,
        "/api/v1/exports/monthly/soybeans?year=2024&include_china=false",
    )
    .await;
    assert!(without["ytdToChinaMmt"].is_null());
    assert_eq!(without["ytdTotalMmt"], 100.6);
}

#[tokio::test]
async fn destinations_top_n() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/exports/by-destination/soybeans?top_n=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["totalMmt"], 107.8);

    let (status, _) = get(&h.app, "/api/v1/exports/by-destination/soybeans?top_n=51").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn ports_default_to_2025() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/exports/by-port/corn").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2025);
    assert_eq!(body["data"][0]["portName"], "Santos");
}

#[tokio::test]
async fn production_state_is_accepted_but_not_applied() {
    let h = harness();
    let (status, national) = get(&h.app, "/api/v1/production/soybeans?years=5").await;
    assert_eq!(status, StatusCode::OK);
    let (status, by_state) = get(&h.app, "/api/v1/production/soybeans?years=5&state=MT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(national["data"], by_state["data"]);
    assert_eq!(national["data"].as_array().unwrap().len(), 5);

    let (status, _) = get(&h.app, "/api/v1/production/soybeans?years=51").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn prices_for_location() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/prices/corn?location=PR").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit"], "BRL/60kg bag");
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r["location"] == "PR"));
    assert_eq!(rows[0]["momChangePct"], 0.0);
}

#[tokio::test]
async fn soy_complex_keeps_table_names() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/soy-complex/balance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "CONAB e Secex");
    for table in ["soja_graos", "farelo", "oleo"] {
        assert_eq!(body[table].as_array().unwrap().len(), 2, "{table}");
    }
    assert!(body["soja_graos"][0]["safra"].is_string());
}

#[tokio::test]
async fn dashboard_summary_bundle() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/dashboard/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["monthly_exports"]["soybeans"]["2024"].as_array().unwrap().len(), 12);
    assert_eq!(body["export_destinations"]["soybeans"].as_array().unwrap().len(), 10);
    assert_eq!(body["survey_data"]["2025/26"][3]["isCurrent"], true);
    assert!(body["survey_data"]["2025/26"][0].get("isCurrent").is_none());
}

#[tokio::test]
async fn refresh_with_wrong_key_is_unauthorized_and_leaves_cache() {
    let h = harness();
    get(&h.app, "/api/v1/balance-sheet/wheat").await;

    let (status, body) = send(&h.app, Method::POST, "/api/v1/admin/refresh?api_key=nope").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid API key");
    assert!(!body.to_string().contains(API_KEY));

    h.refresher.shutdown().await;
    assert_eq!(h.service.status().cache_keys, vec!["balance_wheat"]);
}

#[tokio::test]
async fn refresh_without_key_is_validation_error() {
    let h = harness();
    let (status, _) = send(&h.app, Method::POST, "/api/v1/admin/refresh").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn refresh_with_key_repopulates_dashboard_subset() {
    let h = harness();
    get(&h.app, "/api/v1/balance-sheet/wheat").await;

    let uri = format!("/api/v1/admin/refresh?api_key={API_KEY}");
    let (status, body) = send(&h.app, Method::POST, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "refresh_started");

    h.refresher.shutdown().await;
    let (_, status_body) = get(&h.app, "/api/v1/admin/status").await;
    assert_eq!(status_body["initialized"], true);
    let keys = status_body["cache_keys"].as_array().unwrap();
    assert_eq!(keys.len(), 16);
    assert!(!keys.iter().any(|k| k == "balance_wheat"));
    assert!(status_body["last_updated"]["soy_complex"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let h = harness();
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "https://app.farmhandpro.com")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn empty_location_returns_every_location() {
    let h = harness();
    let (status, body) = get(&h.app, "/api/v1/prices/soybeans?location=").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 36);
    assert!(rows.iter().all(|r| r["location"] != ""));
    assert_eq!(h.service.status().cache_keys, vec!["prices_soybeans_2025"]);
}

#[tokio::test]
async fn arbitrary_locations_and_years_do_not_grow_cache() {
    let h = harness();
    for i in 0..100 {
        let (status, _) = get(&h.app, &format!("/api/v1/prices/corn?location=x{i}")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get(&h.app, &format!("/api/v1/exports/by-port/corn?year={}", 100_000 + i)).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(h.service.store().entry_count(), 0);
}
