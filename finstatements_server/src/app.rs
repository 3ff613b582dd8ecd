//! Router, shared state, and request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use finstatements_lib::{
    IncomeStatement, SortField, SortOrder, StatementFilters, StatementQueryService, StatementSort,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StatementQueryService>,
}

impl AppState {
    pub fn new(service: StatementQueryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/statements/income", get(income_statements))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Credentialed CORS for an explicit origin list; wildcards are not allowed
/// together with credentials.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello World",
    })
}

/// Query parameters of `GET /statements/income`.
#[derive(Debug, Default, Deserialize)]
pub struct IncomeStatementParams {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub min_revenue: Option<f64>,
    pub max_revenue: Option<f64>,
    pub min_net_income: Option<f64>,
    pub max_net_income: Option<f64>,
    #[serde(default)]
    pub sort_by: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

impl IncomeStatementParams {
    pub fn into_parts(self) -> (StatementFilters, StatementSort) {
        let filters = StatementFilters {
            start_year: self.start_year,
            end_year: self.end_year,
            min_revenue: self.min_revenue,
            max_revenue: self.max_revenue,
            min_net_income: self.min_net_income,
            max_net_income: self.max_net_income,
        };
        (filters, StatementSort::new(self.sort_by, self.order))
    }
}

pub async fn income_statements(
    State(state): State<AppState>,
    params: Result<Query<IncomeStatementParams>, QueryRejection>,
) -> Result<Json<Vec<IncomeStatement>>, ApiError> {
    let Query(params) = params?;
    let (filters, sort) = params.into_parts();
    let statements = state.service.query(&filters, &sort).await?;
    Ok(Json(statements))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
