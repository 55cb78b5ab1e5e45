//! End-to-end API tests driving the router with `tower::ServiceExt::oneshot`

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use concursos::cache::SnapshotCache;
use concursos::config::ServerConfig;
use concursos::crawler::RegionFetcher;
use concursos::refresh::RefreshEngine;
use concursos::scheduler::RefreshScheduler;
use concursos::server::{ApiServer, AppState};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PENDING: &str = "Os dados estão sendo coletados ou não há concursos disponíveis no momento. Tente novamente em alguns segundos.";

fn router(cache: Arc<SnapshotCache>) -> Router {
    let state = AppState::new(cache, ServerConfig::default()).unwrap();
    ApiServer::new(state).build_router()
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn mock_source() -> MockServer {
    let server = MockServer::start().await;
    let html = fs::read_to_string("tests/fixtures/html/listing_pa.html").unwrap();

    Mock::given(method("GET"))
        .and(path("/concursos/pa/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_region_before_and_after_cycle() {
    let server = mock_source().await;
    let cache = Arc::new(SnapshotCache::default());
    let router = router(cache.clone());

    // Before any cycle
    let (status, body) = get_json(&router, "/pa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["desenvolvido_por"], "Jeiel Miranda");
    assert_eq!(body["estado"], "Pará");
    assert_eq!(body["uf"], "pa");
    assert_eq!(body["message"], PENDING);
    assert!(body.get("concursos_abertos").is_none());

    let fetcher = RegionFetcher::with_base_url(&server.uri()).unwrap();
    RefreshEngine::new(Arc::new(fetcher), cache).run_cycle().await;

    // After one successful cycle
    let (status, body) = get_json(&router, "/pa").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("message").is_none());

    let open = body["concursos_abertos"].as_array().unwrap();
    let planned = body["concursos_previstos"].as_array().unwrap();
    assert_eq!(open.len(), 3);
    assert_eq!(planned.len(), 2);
    assert_eq!(open[0]["Órgão"], "Prefeitura de Belém");
    assert_eq!(planned[0]["Órgão"], "TJ-PA");
    assert_eq!(planned[1]["Situação"], "Autorizado (PREVISTO)");

    // Regions the cycle could not fetch stay pending
    let (_, body) = get_json(&router, "/sp").await;
    assert_eq!(body["message"], PENDING);
}

#[tokio::test]
async fn test_region_lookup_is_case_insensitive() {
    let server = mock_source().await;
    let cache = Arc::new(SnapshotCache::default());
    let fetcher = RegionFetcher::with_base_url(&server.uri()).unwrap();
    RefreshEngine::new(Arc::new(fetcher), cache.clone()).run_cycle().await;

    let router = router(cache);
    let (lower_status, lower) = get(&router, "/pa").await;
    let (upper_status, upper) = get(&router, "/PA").await;

    assert_eq!(lower_status, StatusCode::OK);
    assert_eq!(upper_status, StatusCode::OK);
    assert_eq!(lower, upper);
}

#[tokio::test]
async fn test_trailing_slash_matches_region() {
    let server = mock_source().await;
    let cache = Arc::new(SnapshotCache::default());
    let fetcher = RegionFetcher::with_base_url(&server.uri()).unwrap();
    RefreshEngine::new(Arc::new(fetcher), cache.clone()).run_cycle().await;

    let router = router(cache);
    let (plain_status, plain) = get(&router, "/pa").await;
    let (slash_status, slash) = get(&router, "/pa/").await;

    assert_eq!(plain_status, StatusCode::OK);
    assert_eq!(slash_status, StatusCode::OK);
    assert_eq!(plain, slash);

    let (status, body) = get_json(&router, "/xx/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("UF 'xx' não encontrada. UFs válidas: ac, "));
}

#[tokio::test]
async fn test_unknown_region() {
    let router = router(Arc::new(SnapshotCache::default()));

    let (status, body) = get_json(&router, "/XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("UF 'XX' não encontrada. UFs válidas: "));
    for code in ["ac", "pa", "sp", "to"] {
        assert!(error.contains(code));
    }
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_docs_page() {
    let router = router(Arc::new(SnapshotCache::default()));

    let (status, html) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>API de Concursos Públicos</title>"));
    assert!(html.contains("href=\"/pa\""));
    assert!(html.contains("São Paulo"));
}

#[tokio::test]
async fn test_list_regions() {
    let router = router(Arc::new(SnapshotCache::default()));

    let (status, body) = get_json(&router, "/api/regions").await;
    assert_eq!(status, StatusCode::OK);

    let regions = body.as_array().unwrap();
    assert_eq!(regions.len(), 27);
    assert_eq!(regions[0], serde_json::json!({"code": "ac", "name": "Acre"}));
    assert_eq!(regions[26]["code"], "to");
}

#[tokio::test]
async fn test_health_reports_scheduler_progress() {
    let server = mock_source().await;
    let cache = Arc::new(SnapshotCache::default());
    let fetcher = RegionFetcher::with_base_url(&server.uri()).unwrap();
    let engine = Arc::new(RefreshEngine::new(Arc::new(fetcher), cache.clone()));
    let scheduler = Arc::new(RefreshScheduler::new(engine, Duration::from_secs(3600)).unwrap());

    let state = AppState::new(cache, ServerConfig::default())
        .unwrap()
        .with_scheduler(scheduler.clone());
    let router = ApiServer::new(state).build_router();

    let (status, body) = get_json(&router, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cycles_completed"], 0);
    assert!(body["last_cycle_at"].is_null());

    let handle = scheduler.start().unwrap();
    let mut waited = Duration::ZERO;
    while scheduler.status().await.cycles_completed == 0 && waited < Duration::from_secs(10) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }

    let (_, body) = get_json(&router, "/api/health").await;
    assert_eq!(body["cycles_completed"], 1);
    assert_eq!(body["regions_populated"], 1);
    assert!(body["last_cycle_at"].is_string());

    scheduler.shutdown();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_metrics_endpoint() {
    concursos::metrics::init_metrics().unwrap();
    let router = router(Arc::new(SnapshotCache::default()));

    get(&router, "/pa").await;
    let (status, text) = get(&router, "/api/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("concursos_api_requests_total"));
}
