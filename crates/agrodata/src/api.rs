//! HTTP surface: routes, parameter validation and middleware.

use std::any::Any;
use std::sync::Arc;

use agrodata_models::{
    BalanceSheetResponse, Commodity, DashboardSummary, ExportsByDestinationResponse,
    ExportsByPortResponse, MonthlyExportsResponse, MonthlyPricesResponse, ProductionResponse,
    ServiceStatus, SoyComplexResponse,
};
use agrodata_service::AgDataService;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::{check_range, ApiError};
use crate::refresh::Refresher;

pub const API_NAME: &str = "Brazil Agricultural Data API";

const DEFAULT_YEAR: i32 = 2025;
const MIN_EXPORT_YEAR: i32 = 2000;
const MAX_EXPORT_YEAR: i32 = 2030;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AgDataService>,
    pub refresher: Refresher,
    admin_api_key: Arc<str>,
}

impl AppState {
    pub fn new(service: Arc<AgDataService>, refresher: Refresher, admin_api_key: &str) -> Self {
        Self {
            service,
            refresher,
            admin_api_key: Arc::from(admin_api_key),
        }
    }
}

/// `Path` whose rejection is reported as a validation error.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose rejection is reported as a validation error.
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

fn default_year() -> i32 {
    DEFAULT_YEAR
}

#[derive(Debug, Deserialize)]
pub struct BalanceSheetParams {
    #[serde(default = "BalanceSheetParams::default_years")]
    pub years: u32,
}

impl BalanceSheetParams {
    fn default_years() -> u32 {
        6
    }
}

#[derive(Debug, Deserialize)]
pub struct MonthlyExportsParams {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "MonthlyExportsParams::default_include_china")]
    pub include_china: bool,
}

impl MonthlyExportsParams {
    fn default_include_china() -> bool {
        true
    }
}

#[derive(Debug, Deserialize)]
pub struct DestinationParams {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "DestinationParams::default_top_n")]
    pub top_n: u32,
}

impl DestinationParams {
    fn default_top_n() -> u32 {
        10
    }
}

#[derive(Debug, Deserialize)]
pub struct YearParams {
    #[serde(default = "default_year")]
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct ProductionParams {
    #[serde(default = "ProductionParams::default_years")]
    pub years: u32,
    /// Accepted for compatibility. Only national series exist, so it does not
    /// filter anything.
    #[serde(default)]
    pub state: Option<String>,
}

impl ProductionParams {
    fn default_years() -> u32 {
        10
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceParams {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Deserialize)]
pub struct RefreshParams {
    pub api_key: String,
}

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let routes = Router::new()
        .route("/", get(root))
        .route("/api/v1/dashboard/summary", get(dashboard_summary))
        .route("/api/v1/balance-sheet/:commodity", get(balance_sheet))
        .route("/api/v1/soy-complex/balance", get(soy_complex_balance))
        .route("/api/v1/exports/monthly/:commodity", get(monthly_exports))
        .route("/api/v1/exports/by-destination/:commodity", get(exports_by_destination))
        .route("/api/v1/exports/by-port/:commodity", get(exports_by_port))
        .route("/api/v1/production/:commodity", get(production))
        .route("/api/v1/prices/:commodity", get(monthly_prices))
        .route("/api/v1/admin/refresh", post(admin_refresh))
        .route("/api/v1/admin/status", get(admin_status));
    with_middleware(routes, cors_origins).with_state(state)
}

/// Outermost first: CORS, tracing, panic recovery. Panics are turned into
/// responses inside the CORS layer so the 500 still carries CORS headers.
fn with_middleware<S>(routes: Router<S>, cors_origins: &[String]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": API_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "timestamp": state.service.now().to_rfc3339(),
        "endpoints": {
            "dashboard": "/api/v1/dashboard/summary",
            "balance_sheet": "/api/v1/balance-sheet/{commodity}",
            "soy_complex": "/api/v1/soy-complex/balance",
            "exports_monthly": "/api/v1/exports/monthly/{commodity}",
            "exports_destinations": "/api/v1/exports/by-destination/{commodity}",
            "exports_ports": "/api/v1/exports/by-port/{commodity}",
            "production": "/api/v1/production/{commodity}",
            "prices": "/api/v1/prices/{commodity}",
            "admin_refresh": "/api/v1/admin/refresh",
            "admin_status": "/api/v1/admin/status",
        },
        "data_sources": [
            "CONAB - portaldeinformacoes.conab.gov.br",
            "SECEX/MDIC - comexstat.mdic.gov.br",
        ],
    }))
}

async fn dashboard_summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.service.get_dashboard_summary().await)
}

async fn balance_sheet(
    State(state): State<AppState>,
    ApiPath(commodity): ApiPath<Commodity>,
    ApiQuery(params): ApiQuery<BalanceSheetParams>,
) -> Result<Json<BalanceSheetResponse>, ApiError> {
    let years = check_range("years", params.years, 1, 20)?;
    Ok(Json(
        state
            .service
            .get_balance_sheet(commodity, years as usize)
            .await,
    ))
}

async fn soy_complex_balance(State(state): State<AppState>) -> Json<SoyComplexResponse> {
    Json(state.service.get_soy_complex_balance().await)
}

async fn monthly_exports(
    State(state): State<AppState>,
    ApiPath(commodity): ApiPath<Commodity>,
    ApiQuery(params): ApiQuery<MonthlyExportsParams>,
) -> Result<Json<MonthlyExportsResponse>, ApiError> {
    let year = check_range("year", params.year, MIN_EXPORT_YEAR, MAX_EXPORT_YEAR)?;
    Ok(Json(
        state
            .service
            .get_monthly_exports(commodity, year, params.include_china)
            .await,
    ))
}

async fn exports_by_destination(
    State(state): State<AppState>,
    ApiPath(commodity): ApiPath<Commodity>,
    ApiQuery(params): ApiQuery<DestinationParams>,
) -> Result<Json<ExportsByDestinationResponse>, ApiError> {
    let top_n = check_range("top_n", params.top_n, 1, 50)?;
    Ok(Json(
        state
            .service
            .get_exports_by_destination(commodity, params.year, top_n as usize)
            .await,
    ))
}

async fn exports_by_port(
    State(state): State<AppState>,
    ApiPath(commodity): ApiPath<Commodity>,
    ApiQuery(params): ApiQuery<YearParams>,
) -> Json<ExportsByPortResponse> {
    Json(state.service.get_exports_by_port(commodity, params.year).await)
}

async fn production(
    State(state): State<AppState>,
    ApiPath(commodity): ApiPath<Commodity>,
    ApiQuery(params): ApiQuery<ProductionParams>,
) -> Result<Json<ProductionResponse>, ApiError> {
    let years = check_range("years", params.years, 1, 50)?;
    if let Some(uf) = &params.state {
        debug!(%commodity, state = %uf, "State filter requested, serving national series");
    }
    Ok(Json(
        state
            .service
            .get_production(commodity, years as usize)
            .await,
    ))
}

async fn monthly_prices(
    State(state): State<AppState>,
    ApiPath(commodity): ApiPath<Commodity>,
    ApiQuery(params): ApiQuery<PriceParams>,
) -> Json<MonthlyPricesResponse> {
    Json(
        state
            .service
            .get_monthly_prices(
                commodity,
                params.year,
                params.location.as_deref().filter(|l| !l.is_empty()),
            )
            .await,
    )
}

async fn admin_refresh(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RefreshParams>,
) -> Result<Json<Value>, ApiError> {
    if params.api_key.as_str() != &*state.admin_api_key {
        warn!("Rejected refresh request with invalid API key");
        return Err(ApiError::Unauthorized);
    }
    let refresh_id = state.refresher.trigger();
    info!(refresh_id = %refresh_id, "Refresh scheduled");
    Ok(Json(json!({ "status": "refresh_started" })))
}

async fn admin_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.service.status())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };
    tracing::error!(detail = %detail, "Handler panicked");
    ApiError::Internal(detail).into_response()
}

/// `*` allows any origin without credentials. Otherwise origins match exactly
/// or by `scheme://*.domain` wildcard, with credentials allowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(CorsAny)
            .allow_methods(CorsAny)
            .allow_headers(CorsAny);
    }

    let allowed = origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| allowed.iter().any(|pattern| origin_matches(pattern, o)))
                .unwrap_or(false)
        }))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn origin_matches(pattern: &str, origin: &str) -> bool {
    match pattern.split_once("*.") {
        Some((scheme, domain)) => origin
            .strip_prefix(scheme)
            .and_then(|rest| rest.strip_suffix(domain))
            .is_some_and(|sub| sub.len() > 1 && sub.ends_with('.')),
        None => pattern == origin,
    }
}
